//! Error types for the host application.

use std::fmt;

/// Errors that abort start-up.
#[derive(Debug)]
pub enum HostError {
    /// Failed to create a surface for the window.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface.
    NoAdapter(wgpu::RequestAdapterError),
    /// Failed to create the GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The surface reports no usable texture format.
    NoSurfaceFormat,
    /// The event loop could not be created or failed while running.
    EventLoop(winit::error::EventLoopError),
    /// The window could not be created.
    WindowCreation(winit::error::OsError),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            HostError::NoAdapter(e) => write!(f, "No compatible GPU adapter found: {}", e),
            HostError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            HostError::NoSurfaceFormat => write!(f, "Surface supports no texture formats"),
            HostError::EventLoop(e) => write!(f, "Event loop error: {}", e),
            HostError::WindowCreation(e) => write!(f, "Failed to create window: {}", e),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::SurfaceCreation(e) => Some(e),
            HostError::NoAdapter(e) => Some(e),
            HostError::DeviceCreation(e) => Some(e),
            HostError::EventLoop(e) => Some(e),
            HostError::WindowCreation(e) => Some(e),
            HostError::NoSurfaceFormat => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for HostError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        HostError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestAdapterError> for HostError {
    fn from(e: wgpu::RequestAdapterError) -> Self {
        HostError::NoAdapter(e)
    }
}

impl From<wgpu::RequestDeviceError> for HostError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        HostError::DeviceCreation(e)
    }
}

impl From<winit::error::EventLoopError> for HostError {
    fn from(e: winit::error::EventLoopError) -> Self {
        HostError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for HostError {
    fn from(e: winit::error::OsError) -> Self {
        HostError::WindowCreation(e)
    }
}

/// Errors reading or writing a settings file.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read or written.
    Io(std::io::Error),
    /// The file is not valid settings JSON.
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Settings file I/O error: {}", e),
            ConfigError::Json(e) => write!(f, "Invalid settings JSON: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}
