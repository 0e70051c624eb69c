//! Reactive sphere - headless driver for the visualizer core
//!
//! A synthesised kick feeds the analyser, the session's bass envelope drives
//! the sphere uniforms and displacement, and a cloth sheet falls into the box
//! alongside it.

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use reactive_sphere::audio::{AudioSession, BassEnvelope, KickSource, KickSynth, SpectrumAnalyser};
use reactive_sphere::cli::Args;
use reactive_sphere::cloth::MassSpring;
use reactive_sphere::params::{AnalyserConfig, SpringParams, VisualParams};
use reactive_sphere::sphere::{SphereDeformer, SphereMesh};
use glam::Vec3;
use reactive_sphere::visual::{diffuse_shade, FrameUniforms};

/// Peak amplitude of the synthesised kick
const KICK_AMPLITUDE: f32 = 0.05;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if !args.fps.is_finite() || args.fps <= 0.0 {
        anyhow::bail!("--fps must be > 0, got {}", args.fps);
    }

    // Audio: kick -> analyser -> session envelope
    let analyser_config = AnalyserConfig::default();
    let analyser =
        SpectrumAnalyser::new(analyser_config.clone()).context("Failed to create analyser")?;
    let synth = KickSynth::new(analyser_config.sample_rate_hz, args.bpm, KICK_AMPLITUDE);
    let source = KickSource::new(synth, analyser, args.samples_per_frame(&analyser_config));

    let envelope =
        BassEnvelope::new(args.envelope_params()).context("Invalid envelope parameters")?;
    let mut session = AudioSession::new(envelope);
    session.open(Box::new(source));

    // Sphere
    let sphere_params = args.sphere_params();
    let mesh = SphereMesh::from_params(&sphere_params).context("Failed to build sphere mesh")?;
    let deformer = SphereDeformer::new(&sphere_params);
    let visual_params = VisualParams::default();
    let mut deformed = Vec::with_capacity(mesh.vertices.len());
    info!(
        "Sphere: {} vertices, {} triangles",
        mesh.vertices.len(),
        mesh.triangle_count()
    );

    // Cloth
    let cloth_config = args.cloth_config();
    let mut cloth = MassSpring::cloth_grid(&cloth_config, SpringParams::default())
        .context("Failed to build cloth")?;
    cloth.pin(args.pin);
    info!(
        "Cloth: {} particles, {} springs",
        cloth.particle_count(),
        cloth.springs().len()
    );

    let mut peak_bass = 0.0f32;
    for frame in 0..args.frames {
        let time_s = frame as f32 / args.fps;

        // Read once per frame, reused for every uniform
        let bass = session.bass_strength();
        peak_bass = peak_bass.max(bass);

        let uniforms = FrameUniforms::compute(time_s, bass, &visual_params)
            .context("Invalid visual parameters")?;
        deformer.deform(&mesh, time_s, uniforms.bass_uniform, &mut deformed);

        cloth
            .step(cloth_config.time_step_s)
            .with_context(|| format!("Cloth step failed at frame {}", frame))?;

        debug!("frame {}: bass {:.3}", frame, bass);
        if args.log_every > 0 && frame % args.log_every == 0 {
            // Mean lit colour of the sphere surface
            let shade = deformed
                .iter()
                .map(|v| {
                    diffuse_shade(
                        v.normal(),
                        uniforms.light_dir,
                        uniforms.sphere_color,
                        visual_params.ambient,
                    )
                })
                .sum::<Vec3>()
                / deformed.len().max(1) as f32;

            info!(
                "t={:6.2}s bass={:.3} spin={:.2} displacement={:.3} shade=({:.2}, {:.2}, {:.2}) cloth_y={:.3} energy={:.4}",
                time_s,
                bass,
                uniforms.model_spin_y,
                SphereDeformer::max_displacement(&mesh, &deformed),
                shade.x,
                shade.y,
                shade.z,
                cloth.centroid().y,
                cloth.kinetic_energy()
            );
        }
    }

    session.close();
    info!(
        "Done: {} frames, peak bass strength {:.3}",
        args.frames, peak_bass
    );
    Ok(())
}
