use chrono::NaiveDateTime;
use signet::{command, Enumeration};

#[derive(Debug, Enumeration)]
enum Sky {
    Clear,
    Cloudy,
    #[signet(value = "storm")]
    Thunderstorm,
}

/// Report the weather for someone.
#[command(config_file = "config-file")]
fn weather(
    name: String,
    #[arg(default = 14, envvar = "WEATHER_AGE")] age: i64,
    #[arg(default = false, help = "Whether it is raining.")] is_rainy: bool,
    #[arg(default = None, help = "Degrees celsius.")] temperature: Option<f64>,
    #[arg(default = Sky::Clear)] sky: Sky,
    #[arg(default = None, formats = ["%Y-%m-%d %H:%M"])] observed: Option<NaiveDateTime>,
) -> signet::anyhow::Result<()> {
    if age < 0 {
        signet::anyhow::bail!("{name} cannot be {age} years old");
    }

    println!("Hello {name} ({age}), the sky is {sky:?}.");

    if is_rainy {
        println!("Bring an umbrella.");
    }

    if let Some(temperature) = temperature {
        println!("It is {temperature}C.");
    }

    if let Some(observed) = observed {
        println!("Observed at {observed}.");
    }

    Ok(())
}

fn main() -> signet::anyhow::Result<()> {
    signet::run(weather_command())
}
