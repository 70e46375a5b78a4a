//! qlvalue CLI
//!
//! Encode literals to client wire bytes and decode wire bytes back into
//! debug strings.

use bytes::BytesMut;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use qlvalue::{ClientProtocol, ColumnValue, DataType, QlError, Result, Value};

/// qlvalue CLI
#[derive(Parser, Debug)]
#[command(name = "qlvalue-cli")]
#[command(about = "Encode and decode CQL wire values")]
#[command(version)]
struct Args {
    /// Client protocol version
    #[arg(short, long, global = true, default_value = "4")]
    protocol: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a scalar literal and print the bytes as hex
    Encode {
        /// CQL type name, e.g. int, text, timeuuid
        #[arg(short = 't', long = "type")]
        data_type: String,

        /// The literal (`null` for variable-length types, `0x..` for blob)
        literal: String,
    },

    /// Decode hex bytes and print the value
    Decode {
        /// CQL type name, e.g. list<int>, map<text, int>
        #[arg(short = 't', long = "type")]
        data_type: String,

        /// The encoded value as hex
        hex: String,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,qlvalue=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let protocol = ClientProtocol::new(args.protocol)?;

    match args.command {
        Commands::Encode { data_type, literal } => {
            let data_type: DataType = data_type.parse()?;
            let value = parse_literal(&literal, &data_type)?;

            let mut buf = BytesMut::new();
            value.serialize(&data_type, protocol, &mut buf)?;
            println!("{}", hex::encode(&buf));
        }
        Commands::Decode { data_type, hex } => {
            let data_type: DataType = data_type.parse()?;
            let bytes = from_hex(&hex)?;

            let mut data = &bytes[..];
            let mut value = Value::null();
            value.deserialize(&data_type, protocol, &mut data)?;

            println!("{}", value);
            tracing::info!("consumed {} of {} bytes", bytes.len() - data.len(), bytes.len());
        }
    }

    Ok(())
}

/// Turn a command-line literal into a value of `data_type`
fn parse_literal(literal: &str, data_type: &DataType) -> Result<Value> {
    if literal.eq_ignore_ascii_case("null") {
        if data_type.is_fixed_width() {
            return Err(QlError::InvalidArgument(format!(
                "{} has no wire encoding for null",
                data_type
            )));
        }
        return Ok(Value::null());
    }

    let bad_literal = |e: &dyn std::fmt::Display| {
        QlError::InvalidArgument(format!("{:?} is not a {}: {}", literal, data_type, e))
    };

    match data_type {
        DataType::TinyInt
        | DataType::SmallInt
        | DataType::Int
        | DataType::BigInt
        | DataType::Timestamp => literal
            .parse::<i64>()
            .map_err(|e| bad_literal(&e))?
            .to_value(data_type),
        DataType::Float | DataType::Double => literal
            .parse::<f64>()
            .map_err(|e| bad_literal(&e))?
            .to_value(data_type),
        DataType::Boolean => literal
            .parse::<bool>()
            .map_err(|e| bad_literal(&e))?
            .to_value(data_type),
        DataType::Blob => {
            let hex = literal.strip_prefix("0x").unwrap_or(literal);
            from_hex(hex)?.as_slice().to_value(data_type)
        }
        DataType::Text
        | DataType::Decimal
        | DataType::Inet
        | DataType::Uuid
        | DataType::TimeUuid => literal.to_value(data_type),
        DataType::Map(..) | DataType::Set(_) | DataType::List(_) => Err(QlError::InvalidArgument(
            format!("collection literals are not supported; encode {} elements one by one", data_type),
        )),
    }
}

/// Hex bytes, ignoring whitespace so dumps like `00 00 00 2a` paste as-is
fn from_hex(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&compact)
        .map_err(|e| QlError::InvalidArgument(format!("{:?} is not a hex byte string: {}", text, e)))
}
