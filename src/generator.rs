use crate::dictionary::Dictionaries;
use crate::entropy::{EntropyError, EntropySource, OsEntropy, SecureRng};
use thiserror::Error;
use zeroize::Zeroizing;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("length must be greater than zero")]
    InvalidLength,

    #[error("minimum letters count is greater than length ({min_letters} > {length})")]
    MinLettersExceedsLength { min_letters: usize, length: usize },

    #[error("empty dict: no characters available for the selected classes")]
    EmptyAlphabet,

    #[error("letters dict is empty, but minimum letters count is {min_letters}")]
    MinLettersUnsatisfiable { min_letters: usize },

    #[error("length {length} is too large to allocate")]
    LengthTooLarge { length: usize },

    #[error("failed to read random sequence")]
    RandomSource(#[from] EntropyError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenerateParams {
    pub length: usize,
    /// Lower bound on characters taken from the lower and upper dictionaries.
    pub min_letters_count: usize,
    pub include_lower: bool,
    pub include_upper: bool,
    pub include_digits: bool,
    pub include_symbols: bool,
}

impl GenerateParams {
    pub fn all_classes(length: usize) -> Self {
        Self {
            length,
            min_letters_count: 0,
            include_lower: true,
            include_upper: true,
            include_digits: true,
            include_symbols: true,
        }
    }

    pub fn standard() -> Self {
        Self {
            min_letters_count: 6,
            ..Self::all_classes(12)
        }
    }

    pub fn pin() -> Self {
        Self {
            length: 4,
            include_digits: true,
            ..Self::default()
        }
    }
}

/// Generates passwords from four character dictionaries using a secure
/// random source.
///
/// A generator holds mutable buffer state and is meant to be used from one
/// thread at a time; create one per thread when generating concurrently.
pub struct Generator<S = OsEntropy> {
    dicts: Dictionaries,
    rng: SecureRng<S>,
}

impl Generator<OsEntropy> {
    pub fn new() -> Self {
        Self::with_dictionaries(Dictionaries::default())
    }

    pub fn with_dictionaries(dicts: Dictionaries) -> Self {
        Self::with_source(dicts, OsEntropy)
    }
}

impl Default for Generator<OsEntropy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EntropySource> Generator<S> {
    pub fn with_source(dicts: Dictionaries, source: S) -> Self {
        Self {
            dicts,
            rng: SecureRng::with_source(source),
        }
    }

    pub fn dictionaries(&self) -> &Dictionaries {
        &self.dicts
    }

    pub fn set_lower(&mut self, lower: &str) -> &mut Self {
        self.dicts.lower = lower.chars().collect();
        self
    }

    pub fn set_upper(&mut self, upper: &str) -> &mut Self {
        self.dicts.upper = upper.chars().collect();
        self
    }

    pub fn set_digits(&mut self, digits: &str) -> &mut Self {
        self.dicts.digits = digits.chars().collect();
        self
    }

    pub fn set_symbols(&mut self, symbols: &str) -> &mut Self {
        self.dicts.symbols = symbols.chars().collect();
        self
    }

    /// Produces a new password.
    ///
    /// Parameter problems are reported before any entropy is consumed. A
    /// failure of the underlying random source is returned as
    /// [`GenerateError::RandomSource`].
    pub fn generate(
        &mut self,
        params: &GenerateParams,
    ) -> Result<Zeroizing<String>, GenerateError> {
        let (letters, others) = self.build_dicts(params)?;

        log::debug!(
            "generating password: length={}, min_letters={}, letters_pool={}, others_pool={}",
            params.length,
            params.min_letters_count,
            letters.len(),
            others.len()
        );

        let mut chars: Zeroizing<Vec<char>> = Zeroizing::new(Vec::new());
        chars
            .try_reserve_exact(params.length)
            .map_err(|_| GenerateError::LengthTooLarge {
                length: params.length,
            })?;

        let letters_count = if others.is_empty() {
            params.length
        } else if !letters.is_empty() {
            self.letters_count(params.min_letters_count, params.length)?
        } else {
            0
        };
        let others_count = params.length - letters_count;

        for _ in 0..letters_count {
            chars.push(letters[self.rng.below(letters.len())?]);
        }
        for _ in 0..others_count {
            chars.push(others[self.rng.below(others.len())?]);
        }

        // Without this the letters would always precede the others.
        self.rng.shuffle(chars.as_mut_slice())?;

        Ok(Zeroizing::new(chars.iter().collect()))
    }

    /// Uniform draw from `[min, length]`, including the case where that range
    /// covers every `usize`.
    fn letters_count(&mut self, min: usize, length: usize) -> Result<usize, EntropyError> {
        let offset = match (length - min).checked_add(1) {
            Some(span) => self.rng.below(span)?,
            None => self.rng.next_u64()? as usize,
        };
        Ok(min + offset)
    }

    fn build_dicts(
        &self,
        params: &GenerateParams,
    ) -> Result<(Vec<char>, Vec<char>), GenerateError> {
        if params.length == 0 {
            return Err(GenerateError::InvalidLength);
        }
        if params.min_letters_count > params.length {
            return Err(GenerateError::MinLettersExceedsLength {
                min_letters: params.min_letters_count,
                length: params.length,
            });
        }

        let mut letters = Vec::new();
        let mut others = Vec::new();
        if params.include_lower {
            letters.extend_from_slice(&self.dicts.lower);
        }
        if params.include_upper {
            letters.extend_from_slice(&self.dicts.upper);
        }
        if params.include_digits {
            others.extend_from_slice(&self.dicts.digits);
        }
        if params.include_symbols {
            others.extend_from_slice(&self.dicts.symbols);
        }

        if letters.is_empty() && others.is_empty() {
            return Err(GenerateError::EmptyAlphabet);
        }
        if letters.is_empty() && params.min_letters_count > 0 {
            return Err(GenerateError::MinLettersUnsatisfiable {
                min_letters: params.min_letters_count,
            });
        }

        Ok((letters, others))
    }
}
