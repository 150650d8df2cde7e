pub mod chirp;
pub mod memory;
pub mod user;

pub use chirp::PostgresChirpRepository;
pub use memory::InMemoryChirpRepository;
pub use memory::InMemoryStore;
pub use memory::InMemoryUserRepository;
pub use user::PostgresUserRepository;
