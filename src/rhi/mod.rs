//! 图形后端抽象上下文
//!
//! 三个互斥、ABI 不兼容的底层图形 API 共用同一套符号：
//! - Direct3D 11：隐式上下文，驱动管理验证
//! - Direct3D 12：显式命令列表
//! - Vulkan：显式 API，应用管理验证层与扩展
//!
//! 后端通过 Cargo feature 在编译期选定（`vulkan` 为默认），
//! 必须且只能启用一个：
//!
//! ```bash
//! cargo build                                          # Vulkan
//! cargo build --no-default-features --features d3d12   # Direct3D 12
//! ```

pub mod api_type;
pub mod context;
pub mod diagnostics;

#[cfg(feature = "d3d11")]
pub mod d3d11;
#[cfg(feature = "d3d12")]
pub mod d3d12;
#[cfg(feature = "vulkan")]
pub mod vulkan;

pub use api_type::ApiType;
pub use context::{BackendHandles, GraphicsContext};
pub use diagnostics::{BuildProfile, DiagnosticFlags};

#[cfg(feature = "d3d11")]
pub use d3d11::D3d11Handles;
#[cfg(feature = "d3d12")]
pub use d3d12::D3d12Handles;
#[cfg(feature = "vulkan")]
pub use vulkan::VulkanHandles;

#[cfg(not(any(feature = "d3d11", feature = "d3d12", feature = "vulkan")))]
compile_error!("no graphics backend selected: enable exactly one of the `d3d11`, `d3d12` or `vulkan` features");

#[cfg(any(
    all(feature = "d3d11", feature = "d3d12"),
    all(feature = "d3d11", feature = "vulkan"),
    all(feature = "d3d12", feature = "vulkan"),
))]
compile_error!("graphics backends are mutually exclusive: enable exactly one of `d3d11`, `d3d12` or `vulkan`");

#[cfg(all(any(feature = "d3d11", feature = "d3d12"), not(target_os = "windows")))]
compile_error!("the Direct3D backends are only available on Windows");

/// 编译期选定的图形 API
#[cfg(feature = "d3d11")]
pub const ACTIVE_API: ApiType = ApiType::D3d11;
/// 编译期选定的图形 API
#[cfg(feature = "d3d12")]
pub const ACTIVE_API: ApiType = ApiType::D3d12;
/// 编译期选定的图形 API
#[cfg(feature = "vulkan")]
pub const ACTIVE_API: ApiType = ApiType::Vulkan;
