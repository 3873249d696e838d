//! Pixelsong Core
//!
//! Turns a decoded image into a mono PCM waveform. Each pixel becomes a short
//! sine tone whose pitch follows its brightness and whose loudness follows
//! its alpha.
//!
//! # Pipeline
//!
//! 1. A [`ScalePool`] of transposed scale templates is built once per process.
//! 2. The image's average brightness fixes a base frequency (200–400 Hz).
//! 3. One scale is drawn from the pool and realised at that base frequency.
//! 4. Every pixel picks a scale degree from its brightness and a volume from
//!    its alpha.
//! 5. Each note is rendered as a fixed-length sine burst and the bursts are
//!    concatenated in raster order.
//!
//! # Determinism
//!
//! All randomness comes from generators passed in by the caller. Given the
//! same pool, scale and pixels, the output is byte-identical across runs.
//! [`rng`] provides PCG32 generators with BLAKE3-derived sub-seeds.
//!
//! # Example
//!
//! ```ignore
//! use pixelsong_core::{rng, PixelBuffer, Sonifier, SonifyConfig};
//!
//! let sonifier = Sonifier::from_seed(42, SonifyConfig::default())?;
//! let pixels = PixelBuffer::new(100, 100, 3, &rgb_bytes)?;
//! let out = sonifier.sonify(&pixels, &mut rng::create_image_rng(42, 0))?;
//!
//! std::fs::write("out.raw", out.pcm_bytes())?;
//! ```

pub mod brightness;
pub mod config;
pub mod error;
pub mod mapping;
pub mod pcm;
pub mod pixels;
pub mod rng;
pub mod scale;
pub mod sonify;
pub mod synth;
pub mod wav;

pub use config::SonifyConfig;
pub use error::{SonifyError, SonifyResult};
pub use mapping::{FrequencyScale, Note};
pub use pixels::{Pixel, PixelBuffer};
pub use scale::{Scale, ScalePool, ScaleTemplate, BUILTIN_TEMPLATES};
pub use sonify::{Sonification, Sonifier};
