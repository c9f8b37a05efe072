pub mod dictionary;
pub mod entropy;
pub mod generator;

pub use dictionary::Dictionaries;
pub use entropy::{EntropyError, EntropySource, OsEntropy, SecureRng};
pub use generator::{GenerateError, GenerateParams, Generator};
