use signet::{
    Action, Application, Argument, Arguments, Command, ConfigurationError, Declared, DeclaredType,
    FloatAction, Outcome, Parameter, ValidationError, Value,
};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// A fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy)]
struct Ratio(f64);

impl Declared for Ratio {
    fn declared_type() -> DeclaredType {
        DeclaredType::Named("ratio")
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(ratio) => Some(Ratio(ratio)),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Float(self.0)
    }
}

#[derive(Debug)]
struct RatioAction;

impl Action for RatioAction {
    fn process(&self, raw: Value, destination: &str) -> Result<Value, ValidationError> {
        match FloatAction.process(raw.clone(), destination)? {
            Value::Float(ratio) if (0.0..=1.0).contains(&ratio) => Ok(Value::Float(ratio)),
            _ => Err(ValidationError::new(
                destination,
                raw.to_string(),
                format!("invalid ratio value: '{raw}'"),
            )),
        }
    }
}

fn run_experiment(mut arguments: Arguments) -> signet::anyhow::Result<()> {
    let protocol: PathBuf = arguments.take("protocol")?;
    let dilution: Ratio = arguments.take("dilution")?;
    let replicates: i64 = arguments.take("replicates")?;
    let dry_run: bool = arguments.take("dry_run")?;

    println!(
        "Running {} x{replicates} at {:.2} dilution{}.",
        protocol.display(),
        dilution.0,
        if dry_run { " (dry run)" } else { "" }
    );
    Ok(())
}

fn show_sample(arguments: Arguments) -> signet::anyhow::Result<Outcome> {
    let sample: Uuid = arguments.get("sample")?;

    if sample.is_nil() {
        println!("Nothing to show.");
        return Ok(Outcome::Exit);
    }

    println!("Sample {sample}");
    Ok(Outcome::Completed)
}

fn main() -> signet::anyhow::Result<()> {
    Application::new("lab_runner")
        .about("Run laboratory experiments.")
        .register(
            "ratio",
            |_: &str, _: &Argument| -> Result<Arc<dyn Action>, ConfigurationError> {
                Ok(Arc::new(RatioAction))
            },
        )
        .command(
            Command::new("run", run_experiment)
                .about("Run an experiment from its protocol.")
                .parameter(
                    Parameter::<PathBuf>::new("protocol").argument(
                        Argument::new()
                            .exists(true)
                            .dir_okay(false)
                            .readable(true)
                            .writable(false)
                            .help("The protocol file."),
                    ),
                )
                .parameter(Parameter::<Ratio>::new("dilution").default(Ratio(0.5)))
                .parameter(
                    Parameter::<i64>::new("replicates")
                        .default(3)
                        .argument(Argument::new().envvar("LAB_REPLICATES")),
                )
                .parameter(Parameter::<bool>::new("dry_run").default(false))
                .config_file("settings"),
        )
        .command(
            Command::new("show", show_sample)
                .about("Show a sample.")
                .parameter(Parameter::<Uuid>::new("sample")),
        )
        .build()
        .run()
}
