//! Aggregate configuration record.
//!
//! [`PickupConfig`] bundles every parameter snapshot into the unit that
//! collaborators persist, export, or diff. The engine itself only consumes
//! the typed records; how the aggregate is stored is the caller's business.

use crate::coil::{CoilGeometry, WireParams};
use crate::load::LoadParams;
use crate::magnet::{MagnetGeometry, MagnetParams, PositioningParams};
use crate::materials::{CoverMaterial, InsulationType, MagnetMaterial};
use crate::transformer::TransformerParams;

/// Full design snapshot of one pickup rig.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupConfig {
    /// Bobbin geometry.
    pub coil_geometry: CoilGeometry,
    /// Magnet wire and winding parameters.
    pub wire: WireParams,
    /// Magnet assembly.
    pub magnet: MagnetParams,
    /// String/coil distances.
    pub positioning: PositioningParams,
    /// Electrical load downstream of the coil.
    pub load: LoadParams,
    /// Optional step-up transformer.
    pub transformer: TransformerParams,
}

impl Default for PickupConfig {
    /// A vintage-style flatwork single coil with rod magnets into the common
    /// passive rig.
    fn default() -> Self {
        Self {
            coil_geometry: CoilGeometry::flatwork_mm(8.0, 15.9, 64.0, 11.1, 1.6),
            wire: WireParams::awg(42, InsulationType::PlainEnamel, 8_000),
            magnet: MagnetParams {
                material: MagnetMaterial::AlNiCo5,
                geometry: MagnetGeometry::Rod {
                    diameter: 5.0e-3,
                    length: 18.0e-3,
                },
                magnetization: 1.0,
                cover: CoverMaterial::None,
            },
            positioning: PositioningParams::from_mm(3.0, 2.0),
            load: LoadParams::default(),
            transformer: TransformerParams::default(),
        }
    }
}
