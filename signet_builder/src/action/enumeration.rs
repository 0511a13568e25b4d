use crate::action::{invalid, Action};
use crate::error::ValidationError;
use crate::model::{Choice, EnumSpec, Value};

/// Matches text against the stringified members of an enumeration, in declaration order.
#[derive(Debug, Clone)]
pub(crate) struct EnumAction {
    spec: EnumSpec,
}

impl EnumAction {
    pub(crate) fn new(spec: EnumSpec) -> Self {
        Self { spec }
    }
}

impl Action for EnumAction {
    fn process(&self, raw: Value, destination: &str) -> Result<Value, ValidationError> {
        let text = match &raw {
            Value::Choice(choice) if self.spec.values.get(choice.index) == Some(&choice.value) => {
                return Ok(raw);
            }
            Value::Choice(choice) => choice.value.clone(),
            Value::Str(text) => text.clone(),
            // Config files may hold the member values as numbers.
            Value::Int(_) | Value::Float(_) | Value::Bool(_) => raw.to_string(),
            _ => String::default(),
        };

        match self.spec.values.iter().position(|value| value == &text) {
            Some(index) => Ok(Value::Choice(Choice::new(index, text))),
            None => Err(invalid(
                destination,
                &raw,
                format!(
                    "invalid choice: '{raw}' (choose from {})",
                    self.spec
                        .values
                        .iter()
                        .map(|v| format!("'{v}'"))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            )),
        }
    }
}

/// Coerces config file values for boolean toggles.
/// On the command line booleans are matched as `--name`/`--no-name` and never reach an action.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BooleanAction;

impl Action for BooleanAction {
    fn process(&self, raw: Value, destination: &str) -> Result<Value, ValidationError> {
        match &raw {
            Value::Bool(_) => Ok(raw),
            Value::Str(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(invalid(
                    destination,
                    &raw,
                    format!("invalid bool value: '{text}'"),
                )),
            },
            _ => Err(invalid(
                destination,
                &raw,
                format!("invalid bool value: '{raw}'"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn colors() -> EnumAction {
        EnumAction::new(EnumSpec::new(
            "Color",
            vec!["0".to_string(), "1".to_string(), "2".to_string()],
        ))
    }

    #[rstest]
    #[case("0", 0)]
    #[case("1", 1)]
    #[case("2", 2)]
    fn member(#[case] raw: &str, #[case] index: usize) {
        assert_eq!(
            colors().process(Value::from(raw), "color").unwrap(),
            Value::Choice(Choice::new(index, raw))
        );
    }

    #[test]
    fn member_from_number() {
        assert_eq!(
            colors().process(Value::Int(1), "color").unwrap(),
            Value::Choice(Choice::new(1, "1"))
        );
    }

    #[rstest]
    #[case(Value::from("4"))]
    #[case(Value::from("RED"))]
    #[case(Value::Int(-1))]
    #[case(Value::None)]
    fn not_a_member(#[case] raw: Value) {
        let error = colors().process(raw, "color").unwrap_err();
        assert_eq!(error.destination(), "color");
        assert!(error.to_string().contains("invalid choice"));
        assert!(error.to_string().contains("'0', '1', '2'"));
    }

    #[test]
    fn choice_passes_through() {
        let choice = Value::Choice(Choice::new(2, "2"));
        assert_eq!(colors().process(choice.clone(), "color").unwrap(), choice);
    }

    #[test]
    fn foreign_choice_is_rematched() {
        // A choice whose index disagrees with this enumeration is matched by its value.
        let choice = Value::Choice(Choice::new(0, "2"));
        assert_eq!(
            colors().process(choice, "color").unwrap(),
            Value::Choice(Choice::new(2, "2"))
        );
    }

    #[test]
    fn first_declared_member_wins() {
        let action = EnumAction::new(EnumSpec::new(
            "Alias",
            vec!["a".to_string(), "a".to_string()],
        ));
        assert_eq!(
            action.process(Value::from("a"), "alias").unwrap(),
            Value::Choice(Choice::new(0, "a"))
        );
    }

    #[rstest]
    #[case(Value::Bool(true), true)]
    #[case(Value::from("true"), true)]
    #[case(Value::from("False"), false)]
    fn boolean(#[case] raw: Value, #[case] expected: bool) {
        assert_eq!(
            BooleanAction.process(raw, "is_rainy").unwrap(),
            Value::Bool(expected)
        );
    }

    #[rstest]
    #[case(Value::from("yes"))]
    #[case(Value::Int(1))]
    fn boolean_invalid(#[case] raw: Value) {
        let error = BooleanAction.process(raw, "is_rainy").unwrap_err();
        assert!(error.to_string().contains("invalid bool value"));
    }
}
