use jiff::civil::Date;

/// What a scheduled moment does when it is processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MomentType {
    Expense,
    ExpenseStart,
    Income,
    IncomeStart,
    Asset,
    AssetStart,
    Transaction,
}

impl MomentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MomentType::Expense => "Expense",
            MomentType::ExpenseStart => "ExpenseStart",
            MomentType::Income => "Income",
            MomentType::IncomeStart => "IncomeStart",
            MomentType::Asset => "Asset",
            MomentType::AssetStart => "AssetStart",
            MomentType::Transaction => "Transaction",
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(
            self,
            MomentType::ExpenseStart | MomentType::IncomeStart | MomentType::AssetStart
        )
    }
}

/// A single scheduled event, created by the moment generator and consumed
/// exactly once by the scheduler
#[derive(Debug, Clone, PartialEq)]
pub struct Moment {
    pub date: Date,
    pub name: String,
    pub kind: MomentType,
    /// Value a start moment sets before any growth is applied
    pub initial_value: Option<f64>,
    /// Index into the run's prepared transactions
    pub transaction: Option<usize>,
}

impl Moment {
    pub fn new(date: Date, name: &str, kind: MomentType) -> Self {
        Self {
            date,
            name: name.to_string(),
            kind,
            initial_value: None,
            transaction: None,
        }
    }

    pub fn start(date: Date, name: &str, kind: MomentType, initial_value: f64) -> Self {
        Self {
            initial_value: Some(initial_value),
            ..Self::new(date, name, kind)
        }
    }

    pub fn transaction(date: Date, name: &str, index: usize) -> Self {
        Self {
            transaction: Some(index),
            ..Self::new(date, name, MomentType::Transaction)
        }
    }
}
