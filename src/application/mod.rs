// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 应用层
//!
//! 请求 DTO 与爬取编排用例，衔接接口层与领域/引擎层

pub mod dto;
pub mod use_cases;
