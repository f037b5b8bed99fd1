// src/main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
mod engine;
mod gui;
mod types;

use std::path::PathBuf;

use eframe::egui;
use env_logger::Env;

// 入口函数: `sigview [FILE]`
fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let initial_file = std::env::args_os().nth(1).map(PathBuf::from);

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 800.0])
        .with_min_inner_size([800.0, 500.0])
        .with_title("sigview");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "sigview",
        options,
        Box::new(move |cc| Box::new(gui::SigViewApp::new(cc, initial_file))),
    )
}
