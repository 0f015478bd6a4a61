//! 图形 API 类型标识

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 当前生效的图形 API
///
/// `Undefined` 只在上下文初始化之前出现。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiType {
    #[default]
    Undefined,
    /// Direct3D 11
    D3d11,
    /// Direct3D 12
    D3d12,
    /// Vulkan
    Vulkan,
}

impl ApiType {
    /// 获取后端名称
    ///
    /// 初始化之后写入上下文的 `api_type_str` 就是这个值。
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiType::Undefined => "Undefined",
            ApiType::D3d11 => "D3D11",
            ApiType::D3d12 => "D3D12",
            ApiType::Vulkan => "Vulkan",
        }
    }

    /// 该后端要求的最低 API 版本
    pub fn min_version(&self) -> &'static str {
        match self {
            ApiType::Undefined => "",
            ApiType::D3d11 => "11.1",
            ApiType::D3d12 => "12.0",
            ApiType::Vulkan => "1.3",
        }
    }
}

impl fmt::Display for ApiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "d3d11" => Ok(ApiType::D3d11),
            "d3d12" => Ok(ApiType::D3d12),
            "vulkan" => Ok(ApiType::Vulkan),
            "undefined" => Ok(ApiType::Undefined),
            other => Err(format!("unknown graphics api '{}'", other)),
        }
    }
}
