//! Error types for embers.
//!
//! Each layer gets its own enum: the particle pool, texture loading, shader
//! loading, the GPU context and renderers, and the application driver.

use std::collections::TryReserveError;
use std::path::PathBuf;

use thiserror::Error;

use crate::camera::CameraMode;

/// Errors that can occur while building a particle pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// Storage for the requested capacity could not be reserved.
    #[error("failed to reserve storage for {capacity} particles: {source}")]
    Allocation {
        capacity: usize,
        #[source]
        source: TryReserveError,
    },
}

/// A camera update was issued in the wrong coordinate mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("camera is in {actual:?} mode, update requires {expected:?}")]
    WrongMode {
        expected: CameraMode,
        actual: CameraMode,
    },
}

/// Errors that can occur during texture loading.
#[derive(Debug, Error)]
pub enum TextureError {
    /// Failed to decode the image file.
    #[error("failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// Pixel buffer does not match the declared dimensions.
    #[error("RGBA data size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Errors raised while reading or validating a WGSL override.
#[derive(Debug, Error)]
pub enum ShaderError {
    /// The override file could not be read.
    #[error("failed to read shader '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// naga rejected the source.
    #[error("invalid WGSL in '{path}': {message}")]
    Invalid { path: PathBuf, message: String },
}

/// Errors that can occur during GPU initialization and resource creation.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found; a Vulkan/Metal/DX12/GL capable GPU is required")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reports no usable texture format.
    #[error("surface is not supported by the selected adapter")]
    UnsupportedSurface,
    /// The per-particle uniform buffer would exceed the device limit.
    #[error("{capacity} particles need a {required}-byte uniform buffer, device limit is {limit}")]
    PoolTooLarge {
        capacity: usize,
        required: u64,
        limit: u64,
    },
}

/// Errors that can occur when running the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to create event loop.
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// The particle pool could not be built.
    #[error("particle pool error: {0}")]
    Pool(#[from] PoolError),
    /// The surface failed in a way the viewer cannot recover from.
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    /// The configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}
