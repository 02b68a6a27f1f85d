mod ata;

pub use ata::cached_associated_token_address;
