use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::process;

use silk_codec::{PassthroughEngine, SampleFormat, SilkDecoder, SilkEncoder, DEFAULT_BIT_RATE};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "encode" => {
            if args.len() < 4 {
                eprintln!("Usage: silk_codec encode <input.pcm> <output.silk> [options]");
                process::exit(1);
            }
            let input_path = &args[2];
            let output_path = &args[3];

            let mut sample_rate = 8000u32;
            let mut sample_bits = 16u32;
            let mut channels = 1u32;
            let mut bit_rate = DEFAULT_BIT_RATE;
            let mut i = 4;
            while i < args.len() {
                match args[i].as_str() {
                    "--sample-rate" => sample_rate = parse_option(&args, &mut i),
                    "--bits" => sample_bits = parse_option(&args, &mut i),
                    "--channels" => channels = parse_option(&args, &mut i),
                    "--bit-rate" => bit_rate = parse_option(&args, &mut i),
                    other => {
                        eprintln!("Error: unknown option '{}'", other);
                        process::exit(1);
                    }
                }
                i += 1;
            }

            if let Err(e) = encode_file(input_path, output_path, sample_rate, sample_bits, channels, bit_rate) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        "decode" => {
            if args.len() < 4 {
                eprintln!("Usage: silk_codec decode <input.silk> <output.pcm> [--sample-rate N]");
                process::exit(1);
            }
            let input_path = &args[2];
            let output_path = &args[3];

            let mut sample_rate = 8000u32;
            let mut i = 4;
            while i < args.len() {
                match args[i].as_str() {
                    "--sample-rate" => sample_rate = parse_option(&args, &mut i),
                    other => {
                        eprintln!("Error: unknown option '{}'", other);
                        process::exit(1);
                    }
                }
                i += 1;
            }

            if let Err(e) = decode_file(input_path, output_path, sample_rate) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        "--help" | "-h" | "help" => {
            print_usage();
        }
        other => {
            eprintln!("Error: unknown command '{}'", other);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("SILK v3 container codec (built-in loopback engine)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  silk_codec encode <input.pcm> <output.silk> [options]");
    eprintln!("  silk_codec decode <input.silk> <output.pcm> [--sample-rate N]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --sample-rate N   Sample rate in Hz (default: 8000)");
    eprintln!("  --bits N          Sample bit depth (default: 16, encode only)");
    eprintln!("  --channels N      Channel count (default: 1, encode only)");
    eprintln!("  --bit-rate N      Encoding bit rate in bps (default: {})", DEFAULT_BIT_RATE);
}

fn parse_option(args: &[String], i: &mut usize) -> u32 {
    let name = args[*i].clone();
    *i += 1;
    if *i >= args.len() {
        eprintln!("Error: {} requires a value", name);
        process::exit(1);
    }
    args[*i].parse().unwrap_or_else(|_| {
        eprintln!("Error: invalid value '{}' for {}", args[*i], name);
        process::exit(1);
    })
}

fn encode_file(
    input_path: &str,
    output_path: &str,
    sample_rate: u32,
    sample_bits: u32,
    channels: u32,
    bit_rate: u32,
) -> io::Result<()> {
    let format = SampleFormat::new(sample_rate, sample_bits, channels)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    let mut encoder = SilkEncoder::<PassthroughEngine>::init(format)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    let in_bytes = std::fs::metadata(input_path)?.len();
    eprintln!(
        "PCM: {} bytes, {} Hz, {}-bit, {} channel(s), {:.1}ms",
        in_bytes,
        sample_rate,
        sample_bits,
        channels,
        in_bytes as f64 / (sample_rate * channels * sample_bits / 8) as f64 * 1000.0
    );

    let mut reader = BufReader::new(File::open(input_path)?);
    let mut writer = BufWriter::new(File::create(output_path)?);
    encoder
        .encode_stream(&mut reader, &mut writer, bit_rate)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    let num_chunks = in_bytes as usize / format.bytes_per_chunk();
    eprintln!(
        "Wrote {} frames ({} bytes) to {}",
        num_chunks,
        std::fs::metadata(output_path)?.len(),
        output_path
    );

    Ok(())
}

fn decode_file(input_path: &str, output_path: &str, sample_rate: u32) -> io::Result<()> {
    let mut decoder = SilkDecoder::<PassthroughEngine>::init(sample_rate)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    let mut reader = BufReader::new(File::open(input_path)?);
    let mut writer = BufWriter::new(File::create(output_path)?);
    decoder
        .decode_stream(&mut reader, &mut writer)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    let out_bytes = std::fs::metadata(output_path)?.len();
    let duration_ms = out_bytes as f64 / (sample_rate * 2) as f64 * 1000.0;
    eprintln!(
        "Wrote {} bytes ({:.1}ms at {} Hz mono 16-bit) to {}",
        out_bytes, duration_ms, sample_rate, output_path
    );

    Ok(())
}
