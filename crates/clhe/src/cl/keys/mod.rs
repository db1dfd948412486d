//! Keys for the CL encryption scheme

mod key_pair;
mod public_key;
mod secret_key;

pub use key_pair::KeyPair;
pub use public_key::PublicKey;
pub use secret_key::SecretKey;
