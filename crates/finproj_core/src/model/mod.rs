mod entities;
mod evaluation;
mod interval;
mod liability;
mod moment;
mod names;
mod transaction;

pub use entities::{Asset, Expense, Income, ModelData, Setting, Transaction, Trigger};
pub use evaluation::Evaluation;
pub use interval::ViewInterval;
pub use liability::{Liability, LiabilityKind};
pub use moment::{Moment, MomentType};
pub use names::{
    BIRTH_DATE_SETTING, CASH, CONDITIONAL_PREFIX, CPI_SETTING, CRYSTALLIZED_PENSION_PREFIX,
    PENSION_PREFIX, REVALUE_PREFIX, SALARY_SACRIFICE_PREFIX, TAX_POT, VIEW_DETAIL_SETTING,
    VIEW_END_SETTING, VIEW_FREQUENCY_SETTING, VIEW_START_SETTING, may_go_negative,
};
pub use transaction::{PreparedTransaction, TransactionKind, TransactionValue};
