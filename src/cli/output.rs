pub use ruthscore_core::format::OutputFormat;
use clap::builder::{PossibleValue, PossibleValuesParser, TypedValueParser};

/// Value parser for `--format`, listing the accepted values in `--help`
pub fn format_parser() -> impl TypedValueParser<Value = OutputFormat> {
    PossibleValuesParser::new([
        PossibleValue::new("human").help("Readable report (default)"),
        PossibleValue::new("json").help("Serialized report"),
        PossibleValue::new("records").help("One record per line for scripts"),
    ])
    .try_map(|value| value.parse::<OutputFormat>())
}
