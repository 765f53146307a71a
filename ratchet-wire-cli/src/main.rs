use ratchet_wire::{decode_message, encode_message, encode_message_length};
use std::io::{self, Read, Write};
use anyhow::{Context, Result, anyhow};
use structopt::StructOpt;

/// Decode and print ratchet wire messages
#[derive(StructOpt)]
#[structopt(name = "rwire")]
struct Opt {
    /// assemble a message from the given fields and write it to stdout instead of decoding stdin
    #[structopt(short, long)]
    encode: bool,
    /// number of trailing MAC bytes outside the field stream
    #[structopt(short, long, default_value = "8")]
    mac_length: usize,
    /// protocol version byte
    #[structopt(short = "p", long, default_value = "3")]
    protocol_version: u8,
    /// send counter
    #[structopt(short, long, default_value = "0")]
    counter: u32,
    /// ratchet public key, base64
    #[structopt(short = "k", long)]
    ratchet_key: Option<String>,
    /// ciphertext, base64
    #[structopt(short = "t", long)]
    ciphertext: Option<String>,
    /// MAC, base64
    #[structopt(long)]
    mac: Option<String>,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    if opt.encode {
        encode(&opt)
    } else {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer).context("Failed to read stdin")?;
        print(&buffer, opt.mac_length)
    }
}

fn print(buffer: &[u8], mac_length: usize) -> Result<()> {
    let (reader, parsed) = decode_message(buffer, mac_length).context("Decoding error")?;
    println!("version:     {}", reader.version);
    println!("counter:     {}", reader.counter);
    println!("ratchet key: {}", base64::encode(reader.ratchet_key));
    println!("ciphertext:  {}", base64::encode(reader.ciphertext));
    println!("mac:         {}", base64::encode(&buffer[parsed..]));
    Ok(())
}

fn encode(opt: &Opt) -> Result<()> {
    let ratchet_key = field(&opt.ratchet_key, "ratchet key")?;
    let ciphertext = field(&opt.ciphertext, "ciphertext")?;
    let mac = match &opt.mac {
        Some(value) => base64::decode(value).context("MAC is not valid base64")?,
        None => Vec::new(),
    };
    let length = encode_message_length(opt.counter, ratchet_key.len(), ciphertext.len(), mac.len());
    let mut buf = vec![0u8; length];
    let writer = encode_message(opt.protocol_version, opt.counter, ratchet_key.len(), ciphertext.len(), &mut buf);
    writer.ratchet_key.copy_from_slice(&ratchet_key);
    writer.ciphertext.copy_from_slice(&ciphertext);
    buf[length - mac.len()..].copy_from_slice(&mac);
    io::stdout().write_all(&buf).context("Failed to write stdout")?;
    Ok(())
}

fn field(value: &Option<String>, name: &str) -> Result<Vec<u8>> {
    let value = value.as_deref().ok_or_else(|| anyhow!("{} is required when encoding", name))?;
    base64::decode(value).with_context(|| format!("{} is not valid base64", name))
}
