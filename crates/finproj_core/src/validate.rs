//! Model validation
//!
//! Must pass before a model is simulated. Every piece of text the engine
//! will parse is parsed here first, and every name a transaction refers to
//! is checked, so the engine only meets internal bugs, never bad input.

use std::collections::HashSet;

use crate::error::{ParseError, ValidationError};
use crate::growth::monthly_growth_rate;
use crate::model::{ModelData, TAX_POT, Transaction, TransactionKind, TransactionValue, Trigger};
use crate::parse::{parse_growth, parse_liabilities, parse_recurrence, parse_value, resolve_date};

/// Check a model, returning the first problem found.
pub fn validate(model: &ModelData) -> Result<(), ValidationError> {
    check_names(model)?;

    for asset in &model.assets {
        date_field(&asset.name, "start", &asset.start, &model.triggers)?;
        growth_field(&asset.name, &asset.growth, model)?;
        liability_field(&asset.name, &asset.liability)?;
    }

    for income in &model.incomes {
        check_cash_flow(
            &income.name,
            [&income.start, &income.end, &income.value_set_date],
            &income.growth,
            model,
        )?;
        liability_field(&income.name, &income.liability)?;
    }

    for expense in &model.expenses {
        check_cash_flow(
            &expense.name,
            [&expense.start, &expense.end, &expense.value_set_date],
            &expense.growth,
            model,
        )?;
    }

    for transaction in &model.transactions {
        check_transaction(transaction, model)?;
    }

    Ok(())
}

fn check_names(model: &ModelData) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    let names = model
        .assets
        .iter()
        .map(|a| &a.name)
        .chain(model.incomes.iter().map(|i| &i.name))
        .chain(model.expenses.iter().map(|e| &e.name))
        .chain(model.settings.iter().map(|s| &s.name));
    for name in names {
        if !seen.insert(name.as_str()) || name == TAX_POT {
            return Err(ValidationError::DuplicateName(name.clone()));
        }
    }
    Ok(())
}

fn check_cash_flow(
    name: &str,
    [start, end, value_set]: [&String; 3],
    growth: &str,
    model: &ModelData,
) -> Result<(), ValidationError> {
    let start = date_field(name, "start", start, &model.triggers)?;
    let end = date_field(name, "end", end, &model.triggers)?;
    if !value_set.trim().is_empty() {
        date_field(name, "value set date", value_set, &model.triggers)?;
    }
    if end < start {
        return Err(ValidationError::EndBeforeStart {
            item: name.to_string(),
        });
    }
    growth_field(name, growth, model)
}

fn check_transaction(t: &Transaction, model: &ModelData) -> Result<(), ValidationError> {
    let name = t.name.as_str();
    date_field(name, "date", &t.date, &model.triggers)?;
    if !t.stop_date.trim().is_empty() {
        date_field(name, "stop date", &t.stop_date, &model.triggers)?;
    }
    if !t.recurrence.trim().is_empty() {
        parse_recurrence(&t.recurrence).map_err(|error| parse_error(name, "recurrence", error))?;
    }
    value_field(name, "FROM value", &t.from_value, model)?;
    let to_value = value_field(name, "TO value", &t.to_value, model)?;

    let kind = TransactionKind::classify(t);
    if t.from.is_empty() && t.to.is_empty() {
        return Err(ValidationError::MissingEndpoints {
            transaction: name.to_string(),
        });
    }

    match kind {
        TransactionKind::Revalue => {
            for target in t.to.split('/').map(str::trim) {
                let known = model.is_asset(target)
                    || model.is_income(target)
                    || model.is_expense(target)
                    || model.is_setting(target);
                if !known {
                    return Err(unknown(name, target));
                }
            }
        }
        TransactionKind::PensionContribution | TransactionKind::SalarySacrifice => {
            if !model.is_income(&t.from) {
                return Err(ValidationError::PensionSource {
                    transaction: name.to_string(),
                    name: t.from.clone(),
                });
            }
            if !t.to.is_empty() && !model.is_asset(&t.to) {
                return Err(ValidationError::PensionTarget {
                    transaction: name.to_string(),
                    name: t.to.clone(),
                });
            }
        }
        _ => {
            for endpoint in [&t.from, &t.to] {
                if !endpoint.is_empty() && !model.is_asset(endpoint) {
                    return Err(unknown(name, endpoint));
                }
            }
            if kind == TransactionKind::Conditional
                && !t.to_absolute
                && to_value == TransactionValue::Literal(0.0)
            {
                return Err(ValidationError::ZeroConditionalMultiplier {
                    transaction: name.to_string(),
                });
            }
        }
    }

    Ok(())
}

fn unknown(transaction: &str, name: &str) -> ValidationError {
    ValidationError::UnknownReference {
        transaction: transaction.to_string(),
        name: name.to_string(),
    }
}

fn parse_error(item: &str, field: &'static str, error: ParseError) -> ValidationError {
    ValidationError::Parse {
        item: item.to_string(),
        field,
        error,
    }
}

fn date_field(
    item: &str,
    field: &'static str,
    text: &str,
    triggers: &[Trigger],
) -> Result<jiff::civil::Date, ValidationError> {
    resolve_date(text, triggers).map_err(|error| parse_error(item, field, error))
}

fn growth_field(item: &str, text: &str, model: &ModelData) -> Result<(), ValidationError> {
    let rate = parse_growth(text, &model.settings).map_err(|e| parse_error(item, "growth", e))?;
    if rate <= -100.0 || monthly_growth_rate(rate, 0.0, true).is_nan() {
        return Err(ValidationError::GrowthOutOfRange {
            item: item.to_string(),
            rate,
        });
    }
    Ok(())
}

fn liability_field(item: &str, text: &str) -> Result<(), ValidationError> {
    parse_liabilities(text)
        .map(|_| ())
        .map_err(|e| parse_error(item, "liability", e))
}

/// Parse a transaction amount, checking any setting it names exists and
/// holds a number. Empty text is allowed and reads as zero.
fn value_field(
    item: &str,
    field: &'static str,
    text: &str,
    model: &ModelData,
) -> Result<TransactionValue, ValidationError> {
    if text.trim().is_empty() {
        return Ok(TransactionValue::Literal(0.0));
    }
    let value = parse_value(text).map_err(|e| parse_error(item, field, e))?;
    if let TransactionValue::Setting(name) = &value {
        let Some(setting) = model.setting(name) else {
            return Err(parse_error(
                item,
                field,
                ParseError::MissingSetting(name.clone()),
            ));
        };
        if !matches!(parse_value(&setting.value), Ok(TransactionValue::Literal(_))) {
            return Err(parse_error(
                item,
                field,
                ParseError::InvalidNumber(setting.value.clone()),
            ));
        }
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AssetBuilder, CashFlowBuilder, ModelBuilder, TransactionBuilder};
    use crate::model::CASH;

    fn base() -> ModelBuilder {
        ModelBuilder::new()
            .asset(AssetBuilder::new(CASH).start("2018-01-01"))
            .asset(AssetBuilder::new("Mortgage").start("2018-01-01").value(-1000.0))
    }

    #[test]
    fn test_valid_model() {
        let model = base()
            .income(
                CashFlowBuilder::income("Salary")
                    .start("2018-01-01")
                    .end("2019-01-01")
                    .value(100.0)
                    .liability("Joe(incomeTax)"),
            )
            .build();
        assert_eq!(validate(&model), Ok(()));
    }

    #[test]
    fn test_duplicate_names() {
        let model = base()
            .expense(
                CashFlowBuilder::expense(CASH)
                    .start("2018-01-01")
                    .end("2019-01-01"),
            )
            .build();
        assert_eq!(
            validate(&model),
            Err(ValidationError::DuplicateName(CASH.to_string()))
        );
    }

    #[test]
    fn test_end_before_start() {
        let model = base()
            .expense(
                CashFlowBuilder::expense("Rent")
                    .start("2019-01-01")
                    .end("2018-01-01"),
            )
            .build();
        assert!(matches!(
            validate(&model),
            Err(ValidationError::EndBeforeStart { .. })
        ));
    }

    #[test]
    fn test_bad_date_and_growth() {
        let model = base()
            .asset(AssetBuilder::new("Stocks").start("someday"))
            .build();
        assert!(matches!(
            validate(&model),
            Err(ValidationError::Parse { field: "start", .. })
        ));

        let model = base()
            .asset(AssetBuilder::new("Stocks").start("2018-01-01").growth("-100"))
            .build();
        assert!(matches!(
            validate(&model),
            Err(ValidationError::GrowthOutOfRange { .. })
        ));
    }

    #[test]
    fn test_unknown_transaction_endpoint() {
        let model = base()
            .transaction(
                TransactionBuilder::new("Move")
                    .from_absolute(CASH, 10.0)
                    .to_proportion("Nowhere", 1.0)
                    .date("2018-02-01"),
            )
            .build();
        assert_eq!(
            validate(&model),
            Err(ValidationError::UnknownReference {
                transaction: "Move".to_string(),
                name: "Nowhere".to_string()
            })
        );
    }

    #[test]
    fn test_conditional_zero_multiplier_rejected() {
        let model = base()
            .transaction(
                TransactionBuilder::new("ConditionalPayMortgage")
                    .from_absolute(CASH, 100.0)
                    .to_proportion("Mortgage", 0.0)
                    .date("2018-02-01"),
            )
            .build();
        assert!(matches!(
            validate(&model),
            Err(ValidationError::ZeroConditionalMultiplier { .. })
        ));
    }

    #[test]
    fn test_pension_must_come_from_income() {
        let model = base()
            .asset(AssetBuilder::new("PensionPot").start("2018-01-01"))
            .transaction(
                TransactionBuilder::new("PensionJoe")
                    .from_proportion(CASH, 0.05)
                    .to_proportion("PensionPot", 1.0)
                    .date("2018-01-01"),
            )
            .build();
        assert!(matches!(
            validate(&model),
            Err(ValidationError::PensionSource { .. })
        ));
    }

    #[test]
    fn test_missing_setting_reference() {
        let model = base()
            .transaction(
                TransactionBuilder::new("RevalueMortgage")
                    .to_value("Mortgage", "mortgageLevel", true)
                    .date("2018-02-01"),
            )
            .build();
        let err = validate(&model).unwrap_err();
        assert!(err.to_string().contains("mortgageLevel"), "{err}");
    }

    #[test]
    fn test_non_numeric_setting_used_as_amount() {
        let model = base()
            .setting("rate", "lots")
            .asset(AssetBuilder::new("Stocks").start("2018-01-01"))
            .transaction(
                TransactionBuilder::new("Invest")
                    .from_absolute(CASH, 100.0)
                    .to_value("Stocks", "rate", false)
                    .date("2018-02-01"),
            )
            .build();
        assert_eq!(
            validate(&model),
            Err(ValidationError::Parse {
                item: "Invest".to_string(),
                field: "TO value",
                error: ParseError::InvalidNumber("lots".to_string()),
            })
        );
    }

    #[test]
    fn test_unused_non_numeric_setting_is_allowed() {
        let model = base().setting("note", "remortgage in 2025").build();
        assert_eq!(validate(&model), Ok(()));
    }
}
