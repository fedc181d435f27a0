//! Template-based 7-day meal planning.

use async_trait::async_trait;

use crate::context::SessionContext;
use crate::error::ToolError;
use crate::tools::PlanTool;

const DAYS: &[&str] = &[
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

struct MealTemplate {
    breakfast: &'static str,
    lunch: &'static str,
    dinner: &'static str,
    vegetarian: bool,
}

const TEMPLATES: &[MealTemplate] = &[
    MealTemplate {
        breakfast: "Oatmeal with berries and nuts",
        lunch: "Salad with grilled chicken",
        dinner: "Baked salmon with roasted vegetables",
        vegetarian: false,
    },
    MealTemplate {
        breakfast: "Greek yogurt with fruit and granola",
        lunch: "Lentil soup with a side salad",
        dinner: "Chicken stir-fry with brown rice",
        vegetarian: false,
    },
    MealTemplate {
        breakfast: "Scrambled eggs with spinach and whole-wheat toast",
        lunch: "Tuna salad sandwich on whole-wheat bread",
        dinner: "Turkey meatballs with zucchini noodles",
        vegetarian: false,
    },
    MealTemplate {
        breakfast: "Smoothie with spinach, banana, and protein powder",
        lunch: "Quinoa bowl with chickpeas and roasted vegetables",
        dinner: "Tofu curry with steamed broccoli and rice",
        vegetarian: true,
    },
    MealTemplate {
        breakfast: "Whole-wheat toast with avocado and a poached egg",
        lunch: "Caprese salad with white beans",
        dinner: "Vegetable chili with a side salad",
        vegetarian: true,
    },
    MealTemplate {
        breakfast: "Cottage cheese with sliced peaches",
        lunch: "Leftover vegetable chili",
        dinner: "Stuffed bell peppers with lentils and rice",
        vegetarian: true,
    },
    MealTemplate {
        breakfast: "Berries with a small protein bar",
        lunch: "Salad with chickpeas and a light vinaigrette",
        dinner: "Grilled halloumi with sweet potato and green beans",
        vegetarian: true,
    },
];

fn wants_vegetarian(ctx: &SessionContext) -> bool {
    ctx.diet_preferences
        .as_deref()
        .map(|diet| {
            let diet = diet.to_lowercase();
            diet.contains("vegetarian") || diet.contains("vegan")
        })
        .unwrap_or(false)
}

/// Deterministic meal planner: one entry per day of the week, drawn from a
/// template pool filtered by dietary preferences and sized to the goal.
pub struct TemplateMealPlanner;

impl TemplateMealPlanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TemplateMealPlanner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlanTool for TemplateMealPlanner {
    fn name(&self) -> &str {
        "meal_planner"
    }

    async fn plan(&self, request: &str, ctx: &SessionContext) -> Result<Vec<String>, ToolError> {
        let vegetarian = wants_vegetarian(ctx);
        let pool: Vec<&MealTemplate> = TEMPLATES
            .iter()
            .filter(|t| !vegetarian || t.vegetarian)
            .collect();
        if pool.is_empty() {
            return Err(ToolError::ExecutionFailed {
                name: self.name().to_string(),
                reason: "no meal templates match the dietary preferences".to_string(),
            });
        }

        let portion_hint = match ctx.goal.as_ref().map(|g| g.goal_type.as_str()) {
            Some("weight loss") => " (smaller portions)",
            Some("muscle gain") | Some("weight gain") => " (larger portions, extra protein)",
            _ => "",
        };

        tracing::debug!(request, vegetarian, "Generating meal plan");
        let plan = DAYS
            .iter()
            .enumerate()
            .map(|(i, day)| {
                let t = pool[i % pool.len()];
                format!(
                    "{day}: Breakfast: {}, Lunch: {}, Dinner: {}{portion_hint}",
                    t.breakfast, t.lunch, t.dinner
                )
            })
            .collect();
        Ok(plan)
    }
}
