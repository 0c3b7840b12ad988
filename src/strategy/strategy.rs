use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

/// One side of a binary choice. Hawk and Dove in the canonical experiment,
/// though nothing here depends on the labels beyond their single-letter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "H")]
    Hawk,
    #[serde(rename = "D")]
    Dove,
}

impl Strategy {
    pub const fn all() -> [Self; 2] {
        [Self::Hawk, Self::Dove]
    }
    /// Index into a two-element weight vector.
    pub const fn index(self) -> usize {
        match self {
            Self::Hawk => 0,
            Self::Dove => 1,
        }
    }
    pub const fn symbol(self) -> char {
        match self {
            Self::Hawk => 'H',
            Self::Dove => 'D',
        }
    }
    /// Uniform choice, used when a participant runs out of time.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::all()[rng.random_range(0..2)]
    }
}

impl From<usize> for Strategy {
    fn from(i: usize) -> Self {
        match i {
            0 => Self::Hawk,
            _ => Self::Dove,
        }
    }
}

impl TryFrom<char> for Strategy {
    type Error = String;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'H' => Ok(Self::Hawk),
            'D' => Ok(Self::Dove),
            _ => Err(format!("unknown strategy symbol {:?}", c)),
        }
    }
}

impl TryFrom<&str> for Strategy {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            _ => Err(format!("unknown strategy {:?}", s)),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn parse_symbols() {
        assert_eq!(Strategy::try_from("H"), Ok(Strategy::Hawk));
        assert_eq!(Strategy::try_from("d"), Ok(Strategy::Dove));
        assert!(Strategy::try_from("HD").is_err());
        assert!(Strategy::try_from("x").is_err());
    }
    #[test]
    fn index_roundtrips() {
        for s in Strategy::all() {
            assert_eq!(Strategy::from(s.index()), s);
        }
    }
    #[test]
    fn serializes_as_symbol() {
        assert_eq!(serde_json::to_string(&Strategy::Hawk).unwrap(), "\"H\"");
        assert_eq!(
            serde_json::from_str::<Strategy>("\"D\"").unwrap(),
            Strategy::Dove
        );
    }
}
