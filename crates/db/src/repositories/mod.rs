//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Methods take `impl PgExecutor` where they participate in multi-write
//! transactions (signup, booking, application review), so the same code
//! runs against the pool or inside `pool.begin()`.

pub mod booking_repo;
pub mod class_repo;
pub mod credit_transaction_repo;
pub mod credits_repo;
pub mod host_application_repo;
pub mod profile_repo;
pub mod role_repo;
pub mod session_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use class_repo::ClassRepo;
pub use credit_transaction_repo::CreditTransactionRepo;
pub use credits_repo::CreditsRepo;
pub use host_application_repo::HostApplicationRepo;
pub use profile_repo::ProfileRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
