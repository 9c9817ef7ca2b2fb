// Export all instruction modules

pub mod create_poll;
pub mod vote;
pub mod vote_with_nft;
pub mod close_poll;

// Re-export the instruction structs for easy access
pub use create_poll::*;
pub use vote::*;
pub use vote_with_nft::*;
pub use close_poll::*;
