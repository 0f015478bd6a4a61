//! rhi_context - 图形后端抽象上下文
//!
//! 在编译期从 Direct3D 11、Direct3D 12、Vulkan 中选定一个后端，
//! 以统一的上下文对外提供后端类型、句柄、基础需求和诊断开关。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理）
//! - `rhi`: 图形上下文与各后端的句柄集合
//!
//! # 使用示例
//!
//! ```
//! use rhi_context::rhi::{BuildProfile, GraphicsContext};
//!
//! let context = GraphicsContext::initialized(BuildProfile::current()).into_shared();
//!
//! let reader = std::sync::Arc::clone(&context);
//! std::thread::spawn(move || {
//!     println!("active backend: {}", reader.api_type_str());
//! })
//! .join()
//! .unwrap();
//! ```

pub mod core;
pub mod rhi;
