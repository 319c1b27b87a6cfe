// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 用例模块
//!
//! 面向接口层的爬取编排入口

pub mod run_crawl;
