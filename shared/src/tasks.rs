//! Task generation from crop lifecycle heuristics
//!
//! Each active crop is run through a table of lifecycle-stage rules. Rules are
//! evaluated independently, so a crop whose status and age point to
//! different stages receives the tasks of every matching stage. A periodic
//! irrigation task is added afterwards for crops that are still in the field
//! and have no irrigation task yet.

use chrono::{Duration, NaiveDate};

use crate::models::{
    CropRecord, StatusKeyword, Task, TaskCategory, TaskPriority, TaskState, TaskStats,
};

/// Number of tasks shown in the dashboard preview
pub const FEATURED_TASK_LIMIT: usize = 5;

const SOWING_WINDOW_DAYS: i64 = 15;
const GROWING_WINDOW_DAYS: i64 = 60;

/// Static description of a task, before it is bound to a crop and a date
struct TaskTemplate {
    name: &'static str,
    /// Prefix completed with the crop type
    description: &'static str,
    priority: TaskPriority,
    category: TaskCategory,
    state: TaskState,
    offset_days: i64,
}

/// What a stage rule can see about one crop
struct CropContext<'a> {
    crop: &'a CropRecord,
    days_since_sowing: Option<i64>,
}

impl CropContext<'_> {
    fn days_within(&self, range: impl Fn(i64) -> bool) -> bool {
        self.days_since_sowing.map_or(false, range)
    }
}

struct StageRule {
    applies: fn(&CropContext) -> bool,
    templates: &'static [TaskTemplate],
}

const STAGE_RULES: &[StageRule] = &[
    StageRule {
        applies: |ctx| {
            ctx.crop.status_is(StatusKeyword::Sowing)
                || ctx.days_within(|d| d <= SOWING_WINDOW_DAYS)
        },
        templates: &[
            TaskTemplate {
                name: "Initial irrigation",
                description: "Keep soil moisture constant for",
                priority: TaskPriority::High,
                category: TaskCategory::Irrigation,
                state: TaskState::Pending,
                offset_days: 1,
            },
            TaskTemplate {
                name: "Germination monitoring",
                description: "Check sprouting of",
                priority: TaskPriority::Medium,
                category: TaskCategory::Monitoring,
                state: TaskState::Scheduled,
                offset_days: 7,
            },
        ],
    },
    StageRule {
        applies: |ctx| {
            ctx.crop.status_is(StatusKeyword::Growing)
                || ctx.days_within(|d| d > SOWING_WINDOW_DAYS && d <= GROWING_WINDOW_DAYS)
        },
        templates: &[
            TaskTemplate {
                name: "NPK fertilization",
                description: "Apply fertilizer to",
                priority: TaskPriority::High,
                category: TaskCategory::Fertilization,
                state: TaskState::Scheduled,
                offset_days: 3,
            },
            TaskTemplate {
                name: "Weed control",
                description: "Clear weeds around",
                priority: TaskPriority::Medium,
                category: TaskCategory::Monitoring,
                state: TaskState::Scheduled,
                offset_days: 5,
            },
            TaskTemplate {
                name: "Pest inspection",
                description: "Inspect leaves and stems of",
                priority: TaskPriority::Medium,
                category: TaskCategory::PestControl,
                state: TaskState::Pending,
                offset_days: 2,
            },
        ],
    },
    StageRule {
        applies: |ctx| {
            ctx.crop.status_is(StatusKeyword::Harvest)
                || ctx.days_within(|d| d > GROWING_WINDOW_DAYS)
        },
        templates: &[
            TaskTemplate {
                name: "Prepare harvest",
                description: "Plan the harvest of",
                priority: TaskPriority::High,
                category: TaskCategory::Harvest,
                state: TaskState::Scheduled,
                offset_days: 7,
            },
            TaskTemplate {
                name: "Reduce irrigation",
                description: "Lower irrigation frequency for",
                priority: TaskPriority::Medium,
                category: TaskCategory::Irrigation,
                state: TaskState::Pending,
                offset_days: 2,
            },
        ],
    },
];

const REGULAR_IRRIGATION: TaskTemplate = TaskTemplate {
    name: "Regular irrigation",
    description: "Maintenance irrigation for",
    priority: TaskPriority::Medium,
    category: TaskCategory::Irrigation,
    state: TaskState::Scheduled,
    offset_days: 2,
};

/// A crop-type rule entry. Due dates and states come from the entry's
/// position in its table.
struct TypeTask {
    name: &'static str,
    description: &'static str,
    priority: TaskPriority,
    category: TaskCategory,
}

const MAIZE_TASKS: &[TypeTask] = &[
    TypeTask {
        name: "Fall armyworm control",
        description: "Inspect and control Spodoptera frugiperda",
        priority: TaskPriority::High,
        category: TaskCategory::PestControl,
    },
    TypeTask {
        name: "Apply insecticide",
        description: "Preventive pest treatment",
        priority: TaskPriority::Medium,
        category: TaskCategory::PestControl,
    },
];

const COFFEE_TASKS: &[TypeTask] = &[
    TypeTask {
        name: "Coffee berry borer control",
        description: "Monitor Hypothenemus hampei",
        priority: TaskPriority::High,
        category: TaskCategory::PestControl,
    },
    TypeTask {
        name: "Selective pruning",
        description: "Remove unproductive branches",
        priority: TaskPriority::Medium,
        category: TaskCategory::Monitoring,
    },
];

const POTATO_TASKS: &[TypeTask] = &[
    TypeTask {
        name: "Hilling",
        description: "Cover exposed tubers",
        priority: TaskPriority::High,
        category: TaskCategory::Monitoring,
    },
    TypeTask {
        name: "Late blight control",
        description: "Prevent Phytophthora infestans",
        priority: TaskPriority::High,
        category: TaskCategory::PestControl,
    },
];

const CASSAVA_TASKS: &[TypeTask] = &[TypeTask {
    name: "Mite control",
    description: "Inspect for Mononychellus tanajoa",
    priority: TaskPriority::Medium,
    category: TaskCategory::PestControl,
}];

const RICE_TASKS: &[TypeTask] = &[TypeTask {
    name: "Aquatic weed control",
    description: "Clean irrigation channels",
    priority: TaskPriority::Medium,
    category: TaskCategory::Monitoring,
}];

/// Rule table for a crop type. The lookup lower-cases the type but is
/// otherwise exact.
fn type_rules(crop_type: &str) -> &'static [TypeTask] {
    match crop_type.to_lowercase().as_str() {
        "maize" | "corn" | "maíz" | "maiz" => MAIZE_TASKS,
        "coffee" | "café" | "cafe" => COFFEE_TASKS,
        "potato" | "papa" => POTATO_TASKS,
        "cassava" | "yuca" => CASSAVA_TASKS,
        "rice" | "arroz" => RICE_TASKS,
        _ => &[],
    }
}

fn due(today: NaiveDate, offset_days: i64) -> NaiveDate {
    today + Duration::days(offset_days)
}

fn instantiate(template: &TaskTemplate, crop: &CropRecord, today: NaiveDate) -> Task {
    Task {
        name: template.name.to_string(),
        description: format!("{} {}", template.description, crop.crop_type),
        plot_ref: crop.plot_ref(),
        due_date: due(today, template.offset_days),
        priority: template.priority,
        category: template.category,
        state: template.state,
    }
}

/// True while a crop still needs tending
fn is_in_field(crop: &CropRecord) -> bool {
    !crop.status_is(StatusKeyword::Finished) && !crop.status_is(StatusKeyword::Lost)
}

/// Generate the task list for a set of crops, sorted by due date then
/// priority.
///
/// Callers pass only the crops they want tasks for (normally the active ones).
/// Crops without a sowing date still match on their status text.
pub fn generate_tasks(crops: &[CropRecord], today: NaiveDate) -> Vec<Task> {
    let mut tasks = Vec::new();

    for crop in crops {
        let ctx = CropContext {
            crop,
            days_since_sowing: crop.days_since_sowing(today),
        };

        for rule in STAGE_RULES.iter().filter(|rule| (rule.applies)(&ctx)) {
            tasks.extend(
                rule.templates
                    .iter()
                    .map(|template| instantiate(template, crop, today)),
            );
        }

        if is_in_field(crop) {
            let plot_ref = crop.plot_ref();
            let has_irrigation = tasks.iter().fold(false, |found, task| {
                found || (task.plot_ref == plot_ref && task.category == TaskCategory::Irrigation)
            });
            if !has_irrigation {
                tasks.push(instantiate(&REGULAR_IRRIGATION, crop, today));
            }
        }
    }

    sort_tasks(&mut tasks);
    tasks
}

/// Tasks specific to one crop type, in table order. Entry `i` is due
/// `(i + 1) * 2` days from `today`; only the first is pending. Unknown types
/// produce no tasks.
pub fn generate_type_specific_tasks(crop_type: &str, crop_id: i64, today: NaiveDate) -> Vec<Task> {
    type_rules(crop_type)
        .iter()
        .enumerate()
        .map(|(i, entry)| Task {
            name: entry.name.to_string(),
            description: entry.description.to_string(),
            plot_ref: crop_id.to_string(),
            due_date: due(today, (i as i64 + 1) * 2),
            priority: entry.priority,
            category: entry.category,
            state: if i == 0 {
                TaskState::Pending
            } else {
                TaskState::Scheduled
            },
        })
        .collect()
}

/// Stable sort: earliest due date first, higher priority first on the same
/// date.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| b.priority.weight().cmp(&a.priority.weight()))
    });
}

/// The first [`FEATURED_TASK_LIMIT`] tasks of an already sorted list
pub fn select_featured(tasks: &[Task]) -> &[Task] {
    &tasks[..tasks.len().min(FEATURED_TASK_LIMIT)]
}

pub fn task_stats(tasks: &[Task]) -> TaskStats {
    tasks.iter().fold(
        TaskStats {
            total: tasks.len(),
            ..TaskStats::default()
        },
        |mut stats, task| {
            match task.state {
                TaskState::Pending => stats.pending += 1,
                TaskState::Scheduled => stats.scheduled += 1,
                TaskState::Completed => stats.completed += 1,
            }
            stats
        },
    )
}
