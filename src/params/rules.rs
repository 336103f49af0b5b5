//! Declarative constraints for string and integer inputs.

use regex::Regex;

use super::detail::Violation;

/// Length and pattern constraints on a string input.
///
/// Lengths count characters, not bytes. Checks run in order min length,
/// max length, pattern; the first failure is reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrRules {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<&'static Regex>,
}

impl StrRules {
    pub const NONE: StrRules = StrRules {
        min_length: None,
        max_length: None,
        pattern: None,
    };

    pub const fn new() -> Self {
        Self::NONE
    }

    pub const fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub const fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub const fn pattern(mut self, pattern: &'static Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn check(&self, value: &str) -> Result<(), Violation> {
        let len = value.chars().count();
        if let Some(min_length) = self.min_length {
            if len < min_length {
                return Err(Violation::TooShort { min_length });
            }
        }
        if let Some(max_length) = self.max_length {
            if len > max_length {
                return Err(Violation::TooLong { max_length });
            }
        }
        if let Some(pattern) = self.pattern {
            if !pattern.is_match(value) {
                return Err(Violation::PatternMismatch {
                    pattern: pattern.as_str().to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Numeric bounds on an integer input.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntRules {
    pub gt: Option<i64>,
    pub ge: Option<i64>,
    pub lt: Option<i64>,
    pub le: Option<i64>,
}

impl IntRules {
    pub const NONE: IntRules = IntRules {
        gt: None,
        ge: None,
        lt: None,
        le: None,
    };

    pub const fn new() -> Self {
        Self::NONE
    }

    pub const fn gt(mut self, bound: i64) -> Self {
        self.gt = Some(bound);
        self
    }

    pub const fn ge(mut self, bound: i64) -> Self {
        self.ge = Some(bound);
        self
    }

    pub const fn lt(mut self, bound: i64) -> Self {
        self.lt = Some(bound);
        self
    }

    pub const fn le(mut self, bound: i64) -> Self {
        self.le = Some(bound);
        self
    }

    pub fn check(&self, value: i64) -> Result<(), Violation> {
        if let Some(gt) = self.gt {
            if value <= gt {
                return Err(Violation::GreaterThan { gt });
            }
        }
        if let Some(ge) = self.ge {
            if value < ge {
                return Err(Violation::GreaterThanEqual { ge });
            }
        }
        if let Some(lt) = self.lt {
            if value >= lt {
                return Err(Violation::LessThan { lt });
            }
        }
        if let Some(le) = self.le {
            if value > le {
                return Err(Violation::LessThanEqual { le });
            }
        }
        Ok(())
    }
}
