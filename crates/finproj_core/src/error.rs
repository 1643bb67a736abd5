use std::fmt;

/// Errors turning model text into numbers, dates and tags
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    InvalidNumber(String),
    InvalidFlag(String),
    InvalidDate(String),
    UnknownTrigger(String),
    InvalidRecurrence(String),
    InvalidLiability(String),
    MissingSetting(String),
    InvalidViewSetting(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidNumber(text) => write!(f, "'{text}' is not a number"),
            ParseError::InvalidFlag(text) => write!(f, "'{text}' is not a Y/N flag"),
            ParseError::InvalidDate(text) => write!(f, "'{text}' is not a date"),
            ParseError::UnknownTrigger(text) => {
                write!(f, "'{text}' is neither a date nor a known trigger")
            }
            ParseError::InvalidRecurrence(text) => {
                write!(f, "'{text}' is not a recurrence like 1m or 2y")
            }
            ParseError::InvalidLiability(text) => {
                write!(f, "'{text}' is not a liability like Joe(incomeTax)")
            }
            ParseError::MissingSetting(name) => write!(f, "setting '{name}' is not defined"),
            ParseError::InvalidViewSetting(text) => {
                write!(f, "'{text}' is not a recognised view option")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors looking up values the engine expects to exist
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    ValueNotFound(String),
    SettingNotFound(String),
    PurchasePriceNotFound(String),
    TransactionNotFound(usize),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::ValueNotFound(name) => write!(f, "no value has been set for {name}"),
            LookupError::SettingNotFound(name) => write!(f, "setting {name} has no value"),
            LookupError::PurchasePriceNotFound(name) => {
                write!(f, "no purchase price recorded for {name}")
            }
            LookupError::TransactionNotFound(index) => {
                write!(f, "moment refers to missing transaction #{index}")
            }
        }
    }
}

impl std::error::Error for LookupError {}

pub type Result<T> = std::result::Result<T, LookupError>;

/// Internal invariant violations met while processing a single moment.
///
/// The scheduler logs these as bugs and carries on with the next moment.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyError {
    Lookup(LookupError),
    InvalidGrowth { name: String, rate: f64 },
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyError::Lookup(e) => write!(f, "{e}"),
            ApplyError::InvalidGrowth { name, rate } => {
                write!(f, "growth for {name} gives invalid monthly rate {rate}")
            }
        }
    }
}

impl std::error::Error for ApplyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApplyError::Lookup(e) => Some(e),
            ApplyError::InvalidGrowth { .. } => None,
        }
    }
}

impl From<LookupError> for ApplyError {
    fn from(err: LookupError) -> Self {
        ApplyError::Lookup(err)
    }
}

/// A malformed model; the message is shown to the user and the
/// simulation does not run
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    DuplicateName(String),
    Parse {
        item: String,
        field: &'static str,
        error: ParseError,
    },
    EndBeforeStart {
        item: String,
    },
    GrowthOutOfRange {
        item: String,
        rate: f64,
    },
    UnknownReference {
        transaction: String,
        name: String,
    },
    MissingEndpoints {
        transaction: String,
    },
    ZeroConditionalMultiplier {
        transaction: String,
    },
    PensionSource {
        transaction: String,
        name: String,
    },
    PensionTarget {
        transaction: String,
        name: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateName(name) => {
                write!(f, "the name '{name}' is used more than once")
            }
            ValidationError::Parse { item, field, error } => {
                write!(f, "{item} has a bad {field}: {error}")
            }
            ValidationError::EndBeforeStart { item } => {
                write!(f, "{item} ends before it starts")
            }
            ValidationError::GrowthOutOfRange { item, rate } => {
                write!(f, "{item} has growth {rate}% which must be above -100%")
            }
            ValidationError::UnknownReference { transaction, name } => {
                write!(f, "transaction {transaction} refers to unknown '{name}'")
            }
            ValidationError::MissingEndpoints { transaction } => {
                write!(f, "transaction {transaction} has neither FROM nor TO")
            }
            ValidationError::ZeroConditionalMultiplier { transaction } => {
                write!(
                    f,
                    "conditional transaction {transaction} has a zero TO multiplier"
                )
            }
            ValidationError::PensionSource { transaction, name } => {
                write!(
                    f,
                    "pension transaction {transaction} must come from an income, not '{name}'"
                )
            }
            ValidationError::PensionTarget { transaction, name } => {
                write!(
                    f,
                    "pension transaction {transaction} must pay into an asset, not '{name}'"
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ValidationError::Parse { error, .. } => Some(error),
            _ => None,
        }
    }
}
