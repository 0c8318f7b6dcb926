//! Column header handling: locating the class column and reading the
//! `!impute` / `!bin` / `!bin-6` directives embedded in column names.

use crate::error::{BayesError, Result};

const CLASS_PREFIX: &str = "class";

/// A preprocessing directive that can be attached to a column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Impute,
    Bin,
    Bin6,
}

impl Directive {
    pub fn token(self) -> &'static str {
        match self {
            Directive::Impute => "impute",
            Directive::Bin => "bin",
            Directive::Bin6 => "bin-6",
        }
    }
}

/// Directives parsed once from a single column name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnDirectives {
    pub impute: bool,
    pub bin: bool,
    pub bin6: bool,
}

impl ColumnDirectives {
    pub fn parse(name: &str) -> Self {
        ColumnDirectives {
            impute: name_has_directive(name, Directive::Impute.token()),
            bin: name_has_directive(name, Directive::Bin.token()),
            bin6: name_has_directive(name, Directive::Bin6.token()),
        }
    }

    pub fn has(&self, directive: Directive) -> bool {
        match directive {
            Directive::Impute => self.impute,
            Directive::Bin => self.bin,
            Directive::Bin6 => self.bin6,
        }
    }

    /// Number of bins for this column: 6 when `bin-6` is present, else `default_bins`.
    pub fn bin_count(&self, default_bins: usize) -> usize {
        if self.bin6 {
            6
        } else {
            default_bins
        }
    }
}

/// The parsed header row of a dataset.
#[derive(Debug, Clone)]
pub struct Header {
    names: Vec<String>,
    class_index: usize,
    directives: Vec<ColumnDirectives>,
}

impl Header {
    pub fn new(names: Vec<String>) -> Result<Self> {
        let class_index = locate_class_column(&names).ok_or(BayesError::ClassColumnNotFound)?;
        let directives = names.iter().map(|name| ColumnDirectives::parse(name)).collect();

        Ok(Header {
            names,
            class_index,
            directives,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, column: usize) -> &str {
        &self.names[column]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    /// Every column except the class column counts as a feature.
    pub fn feature_count(&self) -> usize {
        self.names.len().saturating_sub(1)
    }

    pub fn directives(&self, column: usize) -> ColumnDirectives {
        self.directives[column]
    }

    pub fn has_directive(&self, column: usize, directive: Directive) -> bool {
        self.directives[column].has(directive)
    }
}

/// Returns the first column whose leading five characters are "class", ignoring case.
pub fn locate_class_column<S: AsRef<str>>(header: &[S]) -> Option<usize> {
    header.iter().position(|name| {
        name.as_ref()
            .get(..CLASS_PREFIX.len())
            .map_or(false, |prefix| prefix.eq_ignore_ascii_case(CLASS_PREFIX))
    })
}

/// True when the named column carries `!<token>`. Several directives may share one name.
pub fn has_directive<S: AsRef<str>>(header: &[S], column: usize, token: &str) -> bool {
    header
        .get(column)
        .map_or(false, |name| name_has_directive(name.as_ref(), token))
}

fn name_has_directive(name: &str, token: &str) -> bool {
    format!("{} ", name).contains(&format!("!{}", token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn class_column_is_found_case_insensitively() {
        assert_eq!(locate_class_column(&["id", "f1", "CLASS"]), Some(2));
        assert_eq!(locate_class_column(&["Classification", "class"]), Some(0));
        assert_eq!(locate_class_column(&["id", "cls", "label"]), None);
    }

    #[test]
    fn short_names_do_not_match() {
        assert_eq!(locate_class_column(&["", "cl", "clas"]), None);
    }

    #[test]
    fn directives_are_read_from_names() {
        let header = ["class", "age!impute!bin", "size!bin-6", "colour"];

        assert!(has_directive(&header, 1, "impute"));
        assert!(has_directive(&header, 1, "bin"));
        assert!(!has_directive(&header, 1, "bin-6"));
        assert!(has_directive(&header, 2, "bin"));
        assert!(has_directive(&header, 2, "bin-6"));
        assert!(!has_directive(&header, 3, "bin"));
        assert!(!has_directive(&header, 9, "bin"));
    }

    #[test]
    fn header_caches_directives() {
        let names = vec!["f1!impute".to_string(), "class".to_string(), "f2!bin-6".to_string()];
        let header = Header::new(names).unwrap();

        assert_eq!(header.class_index(), 1);
        assert_eq!(header.feature_count(), 2);
        assert!(header.has_directive(0, Directive::Impute));
        assert!(!header.has_directive(0, Directive::Bin));
        assert_eq!(header.directives(2).bin_count(4), 6);
        assert_eq!(header.directives(0).bin_count(4), 4);
    }

    #[test]
    fn missing_class_column_is_fatal() {
        let err = Header::new(vec!["a".to_string(), "b".to_string()]).unwrap_err();
        assert!(matches!(err, BayesError::ClassColumnNotFound));
    }

    proptest! {
        #[test]
        fn lookup_returns_first_class_prefixed_name(
            names in prop::collection::vec(prop_oneof!["[a-zA-Z]{0,8}", "[cC][lL][aA][sS][sS][a-z!]{0,4}"], 0..8)
        ) {
            let expected = names.iter().position(|n| n.len() >= 5 && n[..5].eq_ignore_ascii_case("class"));
            prop_assert_eq!(locate_class_column(&names), expected);
        }
    }
}
