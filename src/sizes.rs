//! Sizes

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::cart::ValidationError;

/// Garment size offered for every product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Size {
    /// Small
    #[default]
    S,

    /// Medium
    M,

    /// Large
    L,

    /// Extra large
    XL,

    /// Extra extra large
    XXL,
}

impl Size {
    /// Every size, in display order.
    pub const ALL: [Size; 5] = [Size::S, Size::M, Size::L, Size::XL, Size::XXL];

    /// Returns the size label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::XL => "XL",
            Size::XXL => "XXL",
        }
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();

        Size::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(label))
            .ok_or_else(|| ValidationError::UnknownSize(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_every_label() -> TestResult {
        for size in Size::ALL {
            assert_eq!(size.as_str().parse::<Size>()?, size);
        }

        Ok(())
    }

    #[test]
    fn parsing_ignores_case_and_whitespace() -> TestResult {
        assert_eq!(" xl ".parse::<Size>()?, Size::XL);

        Ok(())
    }

    #[test]
    fn unknown_labels_are_rejected() {
        let result = "XXXL".parse::<Size>();

        assert!(
            matches!(result, Err(ValidationError::UnknownSize(ref label)) if label == "XXXL"),
            "expected UnknownSize, got {result:?}"
        );
    }

    #[test]
    fn default_selection_is_small() {
        assert_eq!(Size::default(), Size::S);
    }
}
