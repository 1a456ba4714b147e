//! End-to-end generation: sample, pack, mesh, stitch, assemble.

use myelin_mesh::{CylinderMeshBuilder, PeriodicBoundaryStitcher};
use myelin_packing::PeriodicDiskPacker;
use myelin_sampling::RadiusSampler;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use tracing::{info, info_span};

use crate::{Result, Substrate, SubstrateAssembler, SubstrateConfig};

/// Generate a substrate from `config`, seeding a ChaCha generator from
/// `config.seed`. Identical configs give bit-identical output.
pub fn generate(config: &SubstrateConfig) -> Result<Substrate> {
    let mut rng = ChaChaRng::seed_from_u64(config.seed);
    run(config, &mut rng, Some(config.seed))
}

/// Generate a substrate drawing from a caller-owned generator.
///
/// `config.seed` is ignored and the metadata records no seed.
pub fn generate_with_rng<R: Rng + ?Sized>(config: &SubstrateConfig, rng: &mut R) -> Result<Substrate> {
    run(config, rng, None)
}

fn run<R: Rng + ?Sized>(config: &SubstrateConfig, rng: &mut R, seed: Option<u64>) -> Result<Substrate> {
    let _span = info_span!("generate", seed, count = config.count).entered();
    config.validate()?;

    let sampler = RadiusSampler::new(config.distribution)?;
    let radii = sampler.sample(config.count, rng)?;

    let packer = PeriodicDiskPacker::new(config.packing_config())?;
    let layout = packer.pack(&radii, rng)?;

    let builder = CylinderMeshBuilder::new(config.segments, config.voxel_height)?;
    let stitcher = PeriodicBoundaryStitcher::new(*layout.domain(), builder);
    let mut fragments = Vec::with_capacity(layout.disks().len());
    for (disk_index, disk) in layout.disks().iter().enumerate() {
        fragments.extend(stitcher.fragments(disk_index, disk)?);
    }

    let mut assembler =
        SubstrateAssembler::new(config.seam, config.weld_tolerance(), config.voxel_height)?;
    if let Some(seed) = seed {
        assembler = assembler.with_seed(seed);
    }
    let substrate = assembler.assemble(&radii, &layout, &fragments)?;

    info!(
        cylinders = substrate.cylinder_count(),
        wrapped = substrate.wrapped_count(),
        fraction = substrate.metadata().packing_fraction,
        vertices = substrate.mesh().vertex_count(),
        triangles = substrate.mesh().triangle_count(),
        "Generated substrate"
    );
    Ok(substrate)
}
