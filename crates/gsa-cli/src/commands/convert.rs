use std::io::Read;

use anyhow::Context;
use gsa_core::{FeatureGates, GameServerAllocation};
use gsa_wire::{AllocationRequest, AllocationResponse};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub fn request_to_gsa(input: &str, gates: &FeatureGates) -> anyhow::Result<()> {
    let req: AllocationRequest = read_json(input)?;
    emit(&gsa_convert::request_to_allocation(Some(&req), gates))
}

pub fn gsa_to_request(input: &str, gates: &FeatureGates) -> anyhow::Result<()> {
    let gsa: GameServerAllocation = read_json(input)?;
    emit(&gsa_convert::allocation_to_request(Some(&gsa), gates))
}

pub fn gsa_to_response(input: &str) -> anyhow::Result<()> {
    let gsa: GameServerAllocation = read_json(input)?;
    let response = gsa_convert::allocation_to_response(Some(&gsa))
        .map_err(|e| anyhow::anyhow!("allocation failed ({:?}): {e}", e.code()))?;
    emit(&response)
}

pub fn response_to_gsa(input: &str, source: &str) -> anyhow::Result<()> {
    let resp: AllocationResponse = read_json(input)?;
    emit(&gsa_convert::response_to_allocation(Some(&resp), source))
}

/// Read and decode JSON from a file, or from stdin when `input` is "-".
fn read_json<T: DeserializeOwned>(input: &str) -> anyhow::Result<T> {
    let content = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {input}"))?
    };
    parse_json(&content).with_context(|| format!("invalid JSON in {input}"))
}

fn parse_json<T: DeserializeOwned>(content: &str) -> anyhow::Result<T> {
    Ok(serde_json::from_str(content)?)
}

fn emit<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
