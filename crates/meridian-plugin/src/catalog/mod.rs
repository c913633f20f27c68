// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in modality catalog.
//!
//! The fixed set of modalities compiled into the Meridian binary, in the order
//! the loader registers them. Each entry is plain data wrapped in a
//! [`StaticModality`]; no I/O happens here.

mod acupressure;
mod hydrotherapy;
mod massage;

use std::sync::Arc;

use meridian_core::{ModalityPlugin, Step, StepType};

pub use acupressure::acupressure;
pub use hydrotherapy::hydrotherapy;
pub use massage::massage;

/// Returns every built-in modality, ready to hand to the loader.
///
/// The catalog contains 3 modalities:
/// - acupressure
/// - massage
/// - hydrotherapy
pub fn builtin_catalog() -> Vec<Arc<dyn ModalityPlugin>> {
    vec![
        Arc::new(acupressure()),
        Arc::new(massage()),
        Arc::new(hydrotherapy()),
    ]
}

/// Ids of the built-in modalities, in catalog order.
pub fn builtin_ids() -> Vec<String> {
    builtin_catalog()
        .iter()
        .map(|plugin| plugin.id().to_string())
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn step(
    id: &str,
    order: u32,
    step_type: StepType,
    title: &str,
    description: &str,
    duration: &str,
    techniques: &[&str],
) -> Step {
    Step {
        id: id.to_string(),
        order,
        step_type,
        title: title.to_string(),
        description: description.to_string(),
        duration: duration.to_string(),
        points: Vec::new(),
        techniques: strings(techniques),
        equipment: Vec::new(),
        notes: None,
    }
}
