use anyhow::{bail, Result};
use fortiparse::payload::{decode_nat_payload, decode_policy_payload, NatMode, PayloadError};
use serde::Serialize;

use crate::cli::{SaveArgs, SaveKind};
use crate::input::{describe, read_bytes};

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Ack {
    Policies {
        ok: bool,
        count: usize,
    },
    Nat {
        ok: bool,
        csnat: usize,
        vip: usize,
        udt: usize,
        mode: Option<NatMode>,
    },
    Rejected {
        ok: bool,
        error: String,
    },
}

pub fn run_save(args: SaveArgs) -> Result<()> {
    let bytes = read_bytes(&args.file)?;

    match acknowledge(&bytes, args.kind) {
        Ok(ack) => {
            println!("{}", serde_json::to_string(&ack)?);
            Ok(())
        }
        Err(err) => {
            let rejected = Ack::Rejected {
                ok: false,
                error: err.to_string(),
            };
            println!("{}", serde_json::to_string(&rejected)?);
            bail!("invalid save payload {}: {err}", describe(&args.file));
        }
    }
}

fn acknowledge(bytes: &[u8], kind: SaveKind) -> Result<Ack, PayloadError> {
    let (ack, warnings) = match kind {
        SaveKind::Policies => {
            let payload = decode_policy_payload(bytes)?;
            let ack = Ack::Policies {
                ok: true,
                count: payload.received,
            };
            (ack, payload.warnings)
        }
        SaveKind::Nat => {
            let payload = decode_nat_payload(bytes)?;
            let ack = Ack::Nat {
                ok: true,
                csnat: payload.csnat.len(),
                vip: payload.vip.len(),
                udt: payload.udt.len(),
                mode: payload.mode,
            };
            (ack, payload.warnings)
        }
    };
    for warning in &warnings {
        tracing::warn!("{warning}");
    }
    Ok(ack)
}
