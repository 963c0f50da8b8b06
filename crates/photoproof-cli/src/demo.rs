//! # Demo Subcommand
//!
//! Wires camera, editors and verifier end to end. One camera is set up
//! once; `--chains` independent chains then run on scoped worker threads
//! sharing its keys. Each chain issues a genesis photograph, applies
//! `--edits` transformations with its own editor, and verifies every
//! photograph it produces.
//!
//! ```bash
//! photoproof demo --edits 3 --transform rotate --chains 4
//! photoproof demo --black --transform crop --edits 2 --config bounds.yaml
//! ```
//!
//! The JSON summary on stdout records each verdict. An edit refused by the
//! provenance bounds stops that chain and is reported, not hidden.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use photoproof_core::{Pixel, ProvenanceBounds, PIXEL_COUNT};
use photoproof_crypto::image_digest;
use photoproof_pcd::{Camera, Editor, Photograph, User, Verdict, Verifier};
use photoproof_zkp::{
    BrightnessParams, CropParams, MockProofSystem, RotateParams, Transformation,
};
use serde::Serialize;

use crate::config::DriverConfig;

/// Transformation applied at every edit step.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformKind {
    Identity,
    /// Keep the centre 3x3 block.
    Crop,
    /// One clockwise quarter turn.
    Rotate,
    /// Brighten every channel by 16.
    Brightness,
}

impl TransformKind {
    /// The concrete edit for this kind.
    pub fn transformation(self) -> Transformation {
        match self {
            Self::Identity => Transformation::Identity,
            Self::Crop => Transformation::Crop(CropParams {
                x: 1,
                y: 1,
                width: 3,
                height: 3,
            }),
            Self::Rotate => Transformation::Rotate(RotateParams { quarter_turns: 1 }),
            Self::Brightness => Transformation::Brightness(BrightnessParams { delta: 16 }),
        }
    }
}

/// Upper limit for `--edits`.
pub const MAX_EDITS: u16 = 1024;

/// Arguments for the demo subcommand.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Edits applied to each chain after genesis.
    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(0..=i64::from(MAX_EDITS))
    )]
    pub edits: u16,

    /// Transformation used for every edit.
    #[arg(long = "transform", value_enum, default_value_t = TransformKind::Identity)]
    pub transform: TransformKind,

    /// Independent chains run in parallel.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub chains: u16,

    /// YAML file with genesis provenance bounds.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Issue all-black images instead of random captures.
    #[arg(long)]
    pub black: bool,
}

/// One photograph in a chain.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub transformation: String,
    pub image_hash: String,
    pub signer: String,
    pub verdict: Option<Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_error: Option<String>,
}

/// One chain from genesis to its last photograph.
#[derive(Debug, Clone, Serialize)]
pub struct ChainReport {
    pub chain: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_hash: Option<String>,
    pub photographs: Vec<StepReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChainReport {
    /// Every produced photograph verified.
    pub fn all_accepted(&self) -> bool {
        self.photographs
            .iter()
            .all(|s| s.verdict.is_some_and(|v| v.is_accepted()))
    }
}

/// JSON summary printed by `photoproof demo`.
#[derive(Debug, Clone, Serialize)]
pub struct DemoSummary {
    pub relation: String,
    pub originator: String,
    pub bounds: ProvenanceBounds,
    pub chains: Vec<ChainReport>,
    pub all_verified: bool,
    pub completed: bool,
}

/// Run every chain and collect the summary without printing it.
pub fn demo_summary(args: &DemoArgs) -> Result<DemoSummary> {
    let config = DriverConfig::load_or_default(args.config.as_deref())?;
    let camera = Camera::setup(MockProofSystem, User::generate(), config.bounds)?;
    let verifier = Verifier::new(MockProofSystem);
    let transformation = args.transform.transformation();
    tracing::info!(
        chains = args.chains,
        edits = args.edits,
        transformation = %transformation,
        "starting demo"
    );

    let camera = &camera;
    let verifier = &verifier;
    let chains = std::thread::scope(|s| {
        let handles: Vec<_> = (0..usize::from(args.chains))
            .map(|index| {
                s.spawn(move || {
                    run_chain(
                        index,
                        camera,
                        verifier,
                        transformation,
                        usize::from(args.edits),
                        args.black,
                    )
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join())
            .collect::<std::result::Result<Vec<_>, _>>()
    })
    .map_err(|_| anyhow!("chain worker panicked"))?;

    let all_verified = chains.iter().all(ChainReport::all_accepted);
    let completed = chains.iter().all(|c| c.error.is_none());
    Ok(DemoSummary {
        relation: camera.relation().digest().to_hex(),
        originator: camera.admin_public_key().to_hex(),
        bounds: config.bounds,
        chains,
        all_verified,
        completed,
    })
}

/// Execute the demo subcommand. Exit code 1 when any photograph is rejected
/// or any chain stops early.
pub fn run_demo(args: &DemoArgs) -> Result<u8> {
    let summary = demo_summary(args)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(if summary.all_verified && summary.completed {
        0
    } else {
        1
    })
}

fn run_chain(
    index: usize,
    camera: &Camera,
    verifier: &Verifier,
    transformation: Transformation,
    edits: usize,
    black: bool,
) -> ChainReport {
    let mut report = ChainReport {
        chain: index,
        original_hash: None,
        photographs: Vec::with_capacity(edits + 1),
        error: None,
    };

    let pixels = if black {
        [Pixel::BLACK; PIXEL_COUNT]
    } else {
        camera.capture(&mut rand::thread_rng())
    };
    let mut photo = match camera.issue(pixels) {
        Ok(photo) => photo,
        Err(err) => {
            tracing::error!(chain = index, error = %err, "genesis issuance failed");
            report.error = Some(err.to_string());
            return report;
        }
    };
    report.original_hash = Some(photo.z().original_hash().to_hex());
    report
        .photographs
        .push(step_report(0, "genesis", &photo, camera, verifier));

    let editor = match Editor::new(User::generate(), MockProofSystem) {
        Ok(editor) => editor,
        Err(err) => {
            report.error = Some(err.to_string());
            return report;
        }
    };
    for step in 1..=edits {
        match editor.edit(&photo, &transformation) {
            Ok(next) => {
                report.photographs.push(step_report(
                    step,
                    &transformation.to_string(),
                    &next,
                    camera,
                    verifier,
                ));
                photo = next;
            }
            Err(err) => {
                tracing::warn!(chain = index, step, error = %err, "edit refused");
                report.error = Some(format!("step {step}: {err}"));
                break;
            }
        }
    }
    report
}

fn step_report(
    step: usize,
    transformation: &str,
    photo: &Photograph,
    camera: &Camera,
    verifier: &Verifier,
) -> StepReport {
    let (verdict, backend_error) = match verifier.verdict(photo, camera.verifier_keys()) {
        Ok(verdict) => (Some(verdict), None),
        Err(err) => {
            tracing::error!(step, error = %err, "verification backend failure");
            (None, Some(err.to_string()))
        }
    };
    StepReport {
        step,
        transformation: transformation.to_string(),
        image_hash: image_digest(photo.z().image()).to_hex(),
        signer: photo.proof().signer.to_hex(),
        verdict,
        backend_error,
    }
}
