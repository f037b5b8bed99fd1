// src/gui.rs
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

use eframe::egui;
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoints, PlotUi};
use sigview::decode::{DecodeConfig, DurationUnit, SeriesSummary};
use sigview::export::{render_series_png, write_csv, ExportError, PlotStyle};
use sigview::viewer::{ViewBounds, ViewerState, YScale};

use crate::engine;
use crate::types::*;

const PALETTE: [Color32; 6] = [
    Color32::from_rgb(0x66, 0x7e, 0xea),
    Color32::from_rgb(0xe8, 0x5d, 0x3f),
    Color32::from_rgb(0x2c, 0xa0, 0x6c),
    Color32::from_rgb(0xd1, 0x5b, 0xff),
    Color32::from_rgb(0x14, 0xb8, 0xa6),
    Color32::from_rgb(0x55, 0x55, 0x55),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PaneLayout {
    Overlay,
    Stacked,
}

pub struct SigViewApp {
    state: ViewerState,

    // Channel selection sent with every load
    multi_channel: bool,
    single_channel: u32,
    last_source: Option<FileSource>,
    loads_in_flight: usize,

    layout: PaneLayout,
    // Amplitude axis: auto-fit, or fixed at ±y_limit
    fixed_y: bool,
    y_limit: f64,
    // Re-frame the plot on the next paint (after a load or a window change)
    reframe: bool,

    status: Option<(String, bool)>,
    log_messages: Vec<String>,

    rx: Receiver<LoaderMessage>,
    tx_cmd: Sender<GuiCommand>,
}

impl SigViewApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_file: Option<PathBuf>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let (tx, rx) = channel();
        let (tx_cmd, rx_cmd) = channel();
        engine::spawn_thread(tx, rx_cmd, cc.egui_ctx.clone());

        let mut app = Self {
            state: ViewerState::new(),
            multi_channel: false,
            single_channel: 1,
            last_source: None,
            loads_in_flight: 0,
            layout: PaneLayout::Overlay,
            fixed_y: false,
            y_limit: 100.0,
            reframe: false,
            status: None,
            log_messages: vec!["Ready.".to_owned()],
            rx,
            tx_cmd,
        };
        if let Some(path) = initial_file {
            app.load(FileSource::Path(path));
        }
        app
    }

    fn log(&mut self, msg: &str) {
        self.log_messages.push(format!("> {}", msg));
        if self.log_messages.len() > 8 {
            self.log_messages.remove(0);
        }
    }

    fn decode_config(&self) -> DecodeConfig {
        if self.multi_channel {
            DecodeConfig::multi()
        } else {
            DecodeConfig::single(self.single_channel)
        }
    }

    fn load(&mut self, source: FileSource) {
        self.log(&format!("Loading {}", source.display_name()));
        let cmd = GuiCommand::Load {
            source: source.clone(),
            config: self.decode_config(),
        };
        if self.tx_cmd.send(cmd).is_ok() {
            self.loads_in_flight += 1;
        } else {
            log::error!("loader thread is gone");
        }
        self.last_source = Some(source);
    }

    fn poll_loader(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                LoaderMessage::Log(s) => self.log(&s),
                LoaderMessage::Loaded(outcome) => {
                    self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
                    if outcome.summary.is_none() {
                        self.log(&format!("{}: nothing to display", outcome.file_name));
                    }
                    self.state.apply(outcome);
                    self.reframe = true;
                }
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        // One file at a time: the last one dropped wins.
        if let Some(file) = dropped.into_iter().last() {
            if let Some(path) = file.path {
                self.load(FileSource::Path(path));
            } else if let Some(bytes) = file.bytes {
                self.load(FileSource::Bytes {
                    name: file.name,
                    bytes,
                });
            }
        }
    }

    fn open_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Recordings", &["csv", "json", "svg"])
            .add_filter("All Files", &["*"])
            .pick_file()
        {
            self.load(FileSource::Path(path));
        }
    }

    fn export_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name("signal_data.csv")
            .add_filter("CSV Files", &["csv"])
            .save_file()
        else {
            return;
        };
        let result = File::create(&path)
            .map_err(ExportError::from)
            .and_then(|file| write_csv(self.state.series(), BufWriter::new(file)));
        self.report_export(result, &path);
    }

    fn export_png(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name("signal_view.png")
            .add_filter("PNG Images", &["png"])
            .save_file()
        else {
            return;
        };
        let result = render_series_png(
            self.state.series(),
            self.state.x_range(),
            &PlotStyle::default(),
        )
        .and_then(|png| std::fs::write(&path, png).map_err(ExportError::from));
        self.report_export(result, &path);
    }

    fn report_export(&mut self, result: Result<(), ExportError>, path: &std::path::Path) {
        self.status = Some(match result {
            Ok(()) => (format!("Saved {}", path.display()), false),
            Err(err) => {
                log::warn!("export to {} failed: {err}", path.display());
                (format!("Export failed: {err}"), true)
            }
        });
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            if ui.button("📁 Open…").clicked() {
                self.open_dialog();
            }
            let name = self.state.file_name().unwrap_or("No file chosen");
            ui.label(RichText::new(name).monospace());
            if self.loads_in_flight > 0 {
                ui.spinner();
            }

            ui.separator();
            ui.label("Channels:");
            let before = self.decode_config();
            ui.selectable_value(&mut self.multi_channel, false, "Single");
            ui.selectable_value(&mut self.multi_channel, true, "1–3");
            if !self.multi_channel {
                ui.add(
                    egui::DragValue::new(&mut self.single_channel)
                        .clamp_range(1..=64)
                        .prefix("ch "),
                );
            }
            if self.decode_config() != before {
                if let Some(source) = self.last_source.clone() {
                    self.load(source);
                }
            }

            ui.separator();
            ui.label("Window Size (s):");
            let mut seconds = self.state.window().seconds();
            let response = ui.add(
                egui::DragValue::new(&mut seconds)
                    .clamp_range(1..=u32::MAX)
                    .speed(1.0),
            );
            if response.changed() {
                self.state.set_window_size(seconds);
                self.reframe = true;
            }
            if ui.button("Apply").clicked() {
                self.state.apply_window();
            }
            if ui.button("Reset").clicked() {
                self.state.reset_window();
                self.reframe = true;
            }

            ui.separator();
            ui.label("Y:");
            let mut changed = ui.selectable_value(&mut self.fixed_y, false, "Auto").changed();
            changed |= ui.selectable_value(&mut self.fixed_y, true, "Fixed").changed();
            if self.fixed_y {
                changed |= ui
                    .add(
                        egui::DragValue::new(&mut self.y_limit)
                            .clamp_range(0.001..=f64::MAX)
                            .prefix("± "),
                    )
                    .changed();
            }
            if changed {
                self.state.set_y_scale(y_scale(self.fixed_y, self.y_limit));
                self.reframe = true;
            }

            ui.separator();
            ui.selectable_value(&mut self.layout, PaneLayout::Overlay, "Overlay");
            ui.selectable_value(&mut self.layout, PaneLayout::Stacked, "Stacked");

            ui.separator();
            let has_data = !self.state.series().is_empty();
            if ui
                .add_enabled(has_data, egui::Button::new("Export CSV"))
                .clicked()
            {
                self.export_csv();
            }
            if ui
                .add_enabled(has_data, egui::Button::new("Export PNG"))
                .clicked()
            {
                self.export_png();
            }
        });
    }

    fn info(&mut self, ui: &mut egui::Ui) {
        if let Some(summary) = self.state.summary() {
            ui.horizontal_wrapped(|ui| {
                for line in summary_lines(summary) {
                    ui.label(line);
                    ui.separator();
                }
            });
        }
        if let Some((msg, is_error)) = &self.status {
            let color = if *is_error {
                Color32::RED
            } else {
                Color32::DARK_GREEN
            };
            let mut dismiss = false;
            ui.horizontal(|ui| {
                ui.colored_label(color, msg);
                dismiss = ui.small_button("✕").clicked();
            });
            if dismiss {
                self.status = None;
            }
        }
    }

    fn plots(&mut self, ui: &mut egui::Ui) {
        let lines = self.state.chart_series();
        if lines.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label("Open or drop a CSV, JSON or SVG recording.");
            });
            return;
        }
        let reframe = std::mem::take(&mut self.reframe);

        match self.layout {
            PaneLayout::Overlay => {
                let bounds = if reframe { self.state.view_bounds() } else { None };
                Plot::new("signal_overlay")
                    .legend(Legend::default())
                    .x_axis_label("Time (seconds)")
                    .y_axis_label("Amplitude")
                    .show(ui, |plot_ui| {
                        frame(plot_ui, bounds);
                        for (i, line) in lines.iter().enumerate() {
                            plot_ui.line(
                                Line::new(PlotPoints::new(line.points()))
                                    .name(&line.name)
                                    .color(PALETTE[i % PALETTE.len()]),
                            );
                        }
                    });
            }
            PaneLayout::Stacked => {
                let link = egui::Id::new("signal_panes");
                let height = (ui.available_height() / lines.len() as f32 - 8.0).max(120.0);
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for (i, line) in lines.iter().enumerate() {
                        let bounds = if reframe {
                            self.state.channel_view_bounds(i)
                        } else {
                            None
                        };
                        Plot::new(("signal_pane", i))
                            .height(height)
                            .legend(Legend::default())
                            .link_axis(link, true, false)
                            .link_cursor(link, true, false)
                            .show(ui, |plot_ui| {
                                frame(plot_ui, bounds);
                                plot_ui.line(
                                    Line::new(PlotPoints::new(line.points()))
                                        .name(&line.name)
                                        .color(PALETTE[i % PALETTE.len()]),
                                );
                            });
                    }
                });
            }
        }
    }
}

fn frame(plot_ui: &mut PlotUi, bounds: Option<ViewBounds>) {
    if let Some(b) = bounds {
        plot_ui.set_plot_bounds(PlotBounds::from_min_max([b.x.0, b.y.0], [b.x.1, b.y.1]));
    }
}

fn y_scale(fixed: bool, limit: f64) -> YScale {
    if fixed {
        YScale::Fixed {
            min: -limit,
            max: limit,
        }
    } else {
        YScale::Auto
    }
}

fn summary_lines(summary: &SeriesSummary) -> Vec<String> {
    let mut lines = vec![format!("Total Samples: {}", summary.total_samples)];
    lines.push(match summary.duration_unit {
        DurationUnit::Seconds => format!("Duration: {:.2} seconds", summary.duration),
        DurationUnit::Samples => format!("Duration: {} samples", summary.duration),
    });
    lines.push(match summary.sampling_rate {
        Some(rate) => format!("Sampling Rate: {rate} Hz"),
        None => "Sampling Rate: n/a".to_owned(),
    });
    for stats in &summary.channels {
        lines.push(format!(
            "{}: min {:.2} / max {:.2} | mean {:.2} | RMS {:.2}",
            stats.name, stats.min, stats.max, stats.mean, stats.rms
        ));
    }
    lines
}

impl eframe::App for SigViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader();
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            self.controls(ui);
            self.info(ui);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("log").show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .max_height(60.0)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for m in &self.log_messages {
                        ui.monospace(m);
                    }
                });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.plots(ui);
        });
    }
}
