use chrono::{DateTime, Duration, Local};
use imgui::*;
use tracing::{info, warn};

use crate::dockside::{
    current_shift, format_clock, format_time, parse_numeric, Config, CraneId,
    EquipmentRegistry, OperationLog, OpsError, CRANE_IDS,
};
use crate::support;

enum Notice {
    Info(String),
    Error(String),
}

struct AssignDialog {
    crane_index: usize,
    options: Vec<String>,
    selected: usize,
}

struct IdleReasonDialog {
    options: Vec<String>,
    selected: usize,
    custom: String,
}

struct CraneBox {
    id: CraneId,
    operator: Option<String>,
}

struct GeneratorBox {
    name: String,
    started: Option<DateTime<Local>>,
}

pub struct Gui {
    config: Config,
    registry: EquipmentRegistry,
    log: OperationLog,

    cranes: Vec<CraneBox>,
    assign_dialog: Option<AssignDialog>,
    idle_dialog: Option<IdleReasonDialog>,

    barge_name: String,
    barge_tons: String,
    barge_started: Option<DateTime<Local>>,

    generators: Vec<GeneratorBox>,

    ship_name: String,
    ship_quantity: String,
    ship_hatches: String,
    ship_started: Option<DateTime<Local>>,

    notice: Option<Notice>,
}

impl Gui {
    pub fn new(config: Config) -> Result<Self, OpsError> {
        let log = OperationLog::create(config.log_file.clone())?;
        let cranes = CRANE_IDS
            .iter()
            .map(|id| CraneBox { id: *id, operator: None })
            .collect();
        let generators = config
            .generators
            .iter()
            .map(|name| GeneratorBox { name: name.clone(), started: None })
            .collect();
        Ok(Gui {
            config,
            registry: EquipmentRegistry::new(),
            log,
            cranes,
            assign_dialog: None,
            idle_dialog: None,
            barge_name: String::new(),
            barge_tons: String::new(),
            barge_started: None,
            generators,
            ship_name: String::new(),
            ship_quantity: String::new(),
            ship_hatches: String::new(),
            ship_started: None,
            notice: None,
        })
    }

    pub fn run(mut self) {
        support::simple_init("Dockside", move |run, ui| {
            unsafe { imgui::sys::igStyleColorsLight(std::ptr::null_mut()); }

            let display_size = ui.io().display_size;

            if let Some(window) = ui.window("Dockside")
                .position([0.0, 0.0], Condition::Always)
                .size(display_size, Condition::Always)
                .title_bar(false)
                .resizable(false)
                .movable(false)
                .scroll_bar(false)
                .collapsible(false)
                .bring_to_front_on_focus(false)
                .nav_focus(false)
                .menu_bar(true)
                .begin()
            {
                self.draw(run, ui);
                window.end();
            }
        });
    }

    fn draw(&mut self, run: &mut bool, ui: &Ui) {
        self.draw_menu_bar(run, ui);
        self.draw_status_ribbon(ui);
        self.draw_tabs(ui);
        self.draw_assign_dialog(ui);
        self.draw_idle_dialog(ui);
        self.draw_notice(ui);
    }

    fn draw_menu_bar(&mut self, run: &mut bool, ui: &Ui) {
        ui.menu_bar(|| {
            ui.menu("File", || {
                if ui.menu_item("Choose Log File...") {
                    self.choose_log_file();
                }
                if ui.menu_item("Exit") {
                    *run = false;
                }
            });
            ui.menu("Help", || {
                if ui.menu_item("About") {
                    self.notice = Some(Notice::Info(
                        "Dockside tracks crane, barge, generator and ship operations.".to_string(),
                    ));
                }
            });
        });
    }

    fn choose_log_file(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("YAML log", &["yaml"])
            .set_file_name("operations.yaml")
            .save_file();
        if let Some(path) = picked {
            match OperationLog::create(path) {
                Ok(log) => {
                    info!(path = %log.path().display(), "operation log re-targeted");
                    self.log = log;
                }
                Err(err) => {
                    warn!(%err, "failed to open operation log");
                    self.notice = Some(Notice::Error(err.to_string()));
                }
            }
        }
    }

    fn draw_status_ribbon(&mut self, ui: &Ui) {
        let now = Local::now();
        ui.text(format!("Current Shift: {}", current_shift(now.time())));
        ui.same_line();
        ui.text(now.format("%H:%M:%S").to_string());
        ui.separator();
    }

    fn draw_tabs(&mut self, ui: &Ui) {
        if let Some(_tab_bar) = ui.tab_bar("##tab_bar") {
            if let Some(_tab_item) = ui.tab_item("Cranes") {
                self.draw_cranes_tab(ui);
            }
            if let Some(_tab_item) = ui.tab_item("Barges") {
                self.draw_barges_tab(ui);
            }
            if let Some(_tab_item) = ui.tab_item("Generators") {
                self.draw_generators_tab(ui);
            }
            if let Some(_tab_item) = ui.tab_item("Ships") {
                self.draw_ships_tab(ui);
            }
        }
    }

    fn draw_cranes_tab(&mut self, ui: &Ui) {
        for index in 0..self.cranes.len() {
            if index > 0 {
                ui.same_line();
            }
            ui.group(|| self.draw_crane_box(ui, index));
        }
        ui.separator();
        if ui.button("Stop Both Cranes") {
            self.open_idle_dialog();
        }
    }

    fn draw_crane_box(&mut self, ui: &Ui, index: usize) {
        let id = self.cranes[index].id;
        let running = self.registry.is_running(id);

        ui.text(format!("Crane {}", id));
        ui.text(if running { "Running" } else { "Stopped" });
        ui.text(format_clock(self.registry.elapsed(id)));
        match &self.cranes[index].operator {
            Some(operator) => ui.text(operator),
            None => ui.text("No Operator"),
        }

        let toggle = if running {
            format!("Stop##crane{}", id)
        } else {
            format!("Start##crane{}", id)
        };
        if ui.button(toggle) {
            if running {
                self.open_idle_dialog();
            } else {
                self.start_crane(index);
            }
        }
        if ui.button(format!("Assign Operator##crane{}", id)) {
            self.open_assign_dialog(index);
        }
    }

    fn start_crane(&mut self, index: usize) {
        let id = self.cranes[index].id;
        let Some(operator) = self.cranes[index].operator.clone() else {
            self.notice = Some(Notice::Error("Please assign an operator first.".to_string()));
            return;
        };
        if let Err(err) = self.registry.start(id, &operator) {
            warn!(crane = id.0, %err, "failed to start crane");
            self.notice = Some(Notice::Error(err.to_string()));
        }
    }

    fn open_idle_dialog(&mut self) {
        self.idle_dialog = Some(IdleReasonDialog {
            options: self.config.idle_reasons.clone(),
            selected: 0,
            custom: String::new(),
        });
    }

    fn open_assign_dialog(&mut self, index: usize) {
        let available: Vec<String> = self
            .registry
            .operators()
            .available(&self.config.operators)
            .into_iter()
            .cloned()
            .collect();
        if available.is_empty() {
            self.notice = Some(Notice::Error("All operators have been assigned.".to_string()));
            return;
        }
        self.assign_dialog = Some(AssignDialog {
            crane_index: index,
            options: available,
            selected: 0,
        });
    }

    /// The idle-reason dialog completes the stop for every crane; a crane
    /// that is not running is a no-op.
    fn stop_all_cranes(&mut self, reason: &str) {
        for id in CRANE_IDS {
            if let Err(err) = self.registry.stop(id, reason, &self.log) {
                warn!(crane = id.0, %err, "failed to stop crane");
                self.notice = Some(Notice::Error(err.to_string()));
            }
        }
    }

    fn draw_assign_dialog(&mut self, ui: &Ui) {
        if self.assign_dialog.is_some() {
            ui.open_popup("Assign Operator");
        }
        ui.modal_popup("Assign Operator", || {
            let Some(dialog) = self.assign_dialog.as_mut() else {
                ui.close_current_popup();
                return;
            };
            ui.text(format!(
                "Select Operator for Crane {}:",
                CRANE_IDS[dialog.crane_index]
            ));
            ui.combo_simple_string("##operator", &mut dialog.selected, &dialog.options);
            if ui.button("Assign") {
                if let Some(dialog) = self.assign_dialog.take() {
                    if let Some(name) = dialog.options.get(dialog.selected) {
                        info!(
                            crane = CRANE_IDS[dialog.crane_index].0,
                            operator = name.as_str(),
                            "operator assigned"
                        );
                        self.cranes[dialog.crane_index].operator = Some(name.clone());
                    }
                }
                ui.close_current_popup();
            }
            ui.same_line();
            if ui.button("Cancel") {
                self.assign_dialog = None;
                ui.close_current_popup();
            }
        });
    }

    fn draw_idle_dialog(&mut self, ui: &Ui) {
        if self.idle_dialog.is_some() {
            ui.open_popup("Select Idle Reason");
        }
        ui.modal_popup("Select Idle Reason", || {
            let Some(dialog) = self.idle_dialog.as_mut() else {
                ui.close_current_popup();
                return;
            };
            ui.text("Select Idle Reason:");
            ui.combo_simple_string("##idle_reason", &mut dialog.selected, &dialog.options);
            let is_other = dialog
                .options
                .get(dialog.selected)
                .map(|reason| reason == "Other")
                .unwrap_or(false);
            if is_other {
                ui.input_text("##custom_reason", &mut dialog.custom)
                    .hint("Enter custom reason if \"Other\" selected")
                    .build();
            }
            if ui.button("Submit") {
                if let Some(dialog) = self.idle_dialog.take() {
                    let selected = dialog
                        .options
                        .get(dialog.selected)
                        .map(String::as_str)
                        .unwrap_or("");
                    let reason = resolve_idle_reason(selected, &dialog.custom);
                    self.stop_all_cranes(&reason);
                }
                ui.close_current_popup();
            }
            ui.same_line();
            if ui.button("Cancel") {
                self.idle_dialog = None;
                ui.close_current_popup();
            }
        });
    }

    fn draw_notice(&mut self, ui: &Ui) {
        if self.notice.is_some() {
            ui.open_popup("Notice");
        }
        ui.modal_popup("Notice", || {
            match &self.notice {
                Some(Notice::Error(message)) => ui.text_colored([0.8, 0.1, 0.1, 1.0], message),
                Some(Notice::Info(message)) => ui.text(message),
                None => {}
            }
            if ui.button("OK") {
                self.notice = None;
                ui.close_current_popup();
            }
        });
    }

    fn draw_barges_tab(&mut self, ui: &Ui) {
        ui.input_text("Barge Name/ID", &mut self.barge_name).build();
        ui.input_text("Tons Loaded", &mut self.barge_tons)
            .hint("Enter tons loaded")
            .build();
        match self.barge_started {
            Some(start) => ui.text(format!("Start Time: {}", format_time(start))),
            None => ui.text("Start Time: Not Started"),
        }
        ui.disabled(self.barge_started.is_some(), || {
            if ui.button("Start Barge") {
                self.barge_started = Some(Local::now());
            }
        });
        ui.same_line();
        ui.disabled(self.barge_started.is_none(), || {
            if ui.button("Stop Barge") {
                self.finish_barge();
            }
        });
    }

    fn finish_barge(&mut self) {
        if self.barge_name.trim().is_empty() || self.barge_tons.trim().is_empty() {
            self.notice = Some(Notice::Error(
                "Please fill Barge Name and Tons Loaded".to_string(),
            ));
            return;
        }
        let tons: f64 = match parse_numeric("Tons Loaded", &self.barge_tons) {
            Ok(value) => value,
            Err(err) => {
                self.notice = Some(Notice::Error(err.to_string()));
                return;
            }
        };
        let stop = Local::now();
        // The start column is read from the clock at stop time; the captured
        // start label is display only.
        match self.log.append_barge(&self.barge_name, Local::now(), stop, tons) {
            Ok(()) => {
                self.notice = Some(Notice::Info("Barge data logged successfully".to_string()));
                self.barge_name.clear();
                self.barge_tons.clear();
                self.barge_started = None;
            }
            Err(err) => {
                warn!(%err, "failed to log barge");
                self.notice = Some(Notice::Error(err.to_string()));
            }
        }
    }

    fn draw_generators_tab(&mut self, ui: &Ui) {
        for index in 0..self.generators.len() {
            if index > 0 {
                ui.separator();
            }
            self.draw_generator_box(ui, index);
        }
    }

    fn draw_generator_box(&mut self, ui: &Ui, index: usize) {
        let running = self.generators[index].started.is_some();
        ui.text(&self.generators[index].name);
        ui.text(if running { "Running" } else { "Stopped" });
        let elapsed = match self.generators[index].started {
            Some(start) => Local::now() - start,
            None => Duration::zero(),
        };
        ui.text(format!("Running Time: {}", format_clock(elapsed)));
        let toggle = if running {
            format!("Stop##generator{}", index)
        } else {
            format!("Start##generator{}", index)
        };
        if ui.button(toggle) {
            self.toggle_generator(index);
        }
    }

    fn toggle_generator(&mut self, index: usize) {
        match self.generators[index].started {
            None => self.generators[index].started = Some(Local::now()),
            Some(start) => {
                let stop = Local::now();
                let name = self.generators[index].name.clone();
                match self.log.append_generator(&name, start, stop) {
                    Ok(()) => self.generators[index].started = None,
                    Err(err) => {
                        warn!(generator = name.as_str(), %err, "failed to log generator");
                        self.notice = Some(Notice::Error(err.to_string()));
                    }
                }
            }
        }
    }

    fn draw_ships_tab(&mut self, ui: &Ui) {
        ui.input_text("Ship Name", &mut self.ship_name).build();
        ui.input_text("Quantity", &mut self.ship_quantity)
            .hint("Enter quantity")
            .build();
        ui.input_text("Number of Hatches", &mut self.ship_hatches)
            .hint("Number of hatches")
            .build();
        match self.ship_started {
            Some(start) => ui.text(format!("Start Time: {}", format_time(start))),
            None => ui.text("Start Time: Not Started"),
        }
        ui.disabled(self.ship_started.is_some(), || {
            if ui.button("Start Ship") {
                self.start_ship();
            }
        });
        ui.same_line();
        ui.disabled(self.ship_started.is_none(), || {
            if ui.button("Finish Ship") {
                self.finish_ship();
            }
        });
    }

    fn start_ship(&mut self) {
        if self.ship_name.trim().is_empty() {
            self.notice = Some(Notice::Error("Please enter ship name".to_string()));
            return;
        }
        self.ship_started = Some(Local::now());
    }

    fn finish_ship(&mut self) {
        if self.ship_name.trim().is_empty()
            || self.ship_quantity.trim().is_empty()
            || self.ship_hatches.trim().is_empty()
        {
            self.notice = Some(Notice::Error("Please fill all fields".to_string()));
            return;
        }
        let quantity: f64 = match parse_numeric("Quantity", &self.ship_quantity) {
            Ok(value) => value,
            Err(err) => {
                self.notice = Some(Notice::Error(err.to_string()));
                return;
            }
        };
        let hatches: u32 = match parse_numeric("Number of Hatches", &self.ship_hatches) {
            Ok(value) => value,
            Err(err) => {
                self.notice = Some(Notice::Error(err.to_string()));
                return;
            }
        };
        let finish = Local::now();
        // Same clock quirk as the barge form: the logged start time is read
        // at finish time.
        match self.log.append_ship(
            &self.ship_name,
            Some(Local::now()),
            Some(finish),
            Some(quantity),
            Some(hatches),
        ) {
            Ok(()) => {
                self.notice = Some(Notice::Info("Ship data logged successfully".to_string()));
                self.ship_name.clear();
                self.ship_quantity.clear();
                self.ship_hatches.clear();
                self.ship_started = None;
            }
            Err(err) => {
                warn!(%err, "failed to log ship");
                self.notice = Some(Notice::Error(err.to_string()));
            }
        }
    }
}

/// "Other" falls back to the free-text reason, or "Unspecified" when the
/// text is left empty.
fn resolve_idle_reason(selected: &str, custom: &str) -> String {
    if selected == "Other" {
        let custom = custom.trim();
        if custom.is_empty() {
            "Unspecified".to_string()
        } else {
            custom.to_string()
        }
    } else {
        selected.to_string()
    }
}
