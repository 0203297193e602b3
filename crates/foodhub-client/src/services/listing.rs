use crate::models::{Meal, Provider};

/// Category chips shown above the listing.
pub const CATEGORIES: [&str; 7] = ["All", "Pizza", "Burger", "Sushi", "Dessert", "Healthy", "Drinks"];

const DEALS: std::ops::Range<usize> = 0..2;
const COMBOS: std::ops::Range<usize> = 2..4;
const RECOMMENDED: std::ops::Range<usize> = 0..8;
const TOP_PROVIDERS: usize = 3;

/// Case-insensitive substring match on the meal name or provider name.
///
/// A meal without a provider relation can still match on its name.
pub fn filter_meals<'a>(meals: &'a [Meal], query: &str) -> Vec<&'a Meal> {
    let needle = query.to_lowercase();
    meals
        .iter()
        .filter(|meal| {
            meal.name.to_lowercase().contains(&needle)
                || meal
                    .provider_name()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect()
}

fn window<'a, T>(items: &'a [T], range: std::ops::Range<usize>) -> &'a [T] {
    let end = range.end.min(items.len());
    let start = range.start.min(end);
    &items[start..end]
}

/// Meal listing state and its derived display sections.
///
/// Sections are positional slices of the filtered list, so a meal can show up
/// in more than one of them.
#[derive(Debug, Clone)]
pub struct MealListing {
    meals: Vec<Meal>,
    providers: Vec<Provider>,
    search_query: String,
    selected_category: String,
}

impl Default for MealListing {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl MealListing {
    pub fn new(meals: Vec<Meal>, providers: Vec<Provider>) -> Self {
        Self {
            meals,
            providers,
            search_query: String::new(),
            selected_category: CATEGORIES[0].to_string(),
        }
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn set_meals(&mut self, meals: Vec<Meal>) {
        self.meals = meals;
    }

    pub fn set_providers(&mut self, providers: Vec<Provider>) {
        self.providers = providers;
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    /// Records the highlighted category. The filtered list is unaffected.
    pub fn select_category(&mut self, category: impl Into<String>) {
        self.selected_category = category.into();
    }

    pub fn filtered(&self) -> Vec<&Meal> {
        filter_meals(&self.meals, &self.search_query)
    }

    pub fn deals(&self) -> Vec<&Meal> {
        window(&self.filtered(), DEALS).to_vec()
    }

    pub fn combos(&self) -> Vec<&Meal> {
        window(&self.filtered(), COMBOS).to_vec()
    }

    pub fn recommended(&self) -> Vec<&Meal> {
        window(&self.filtered(), RECOMMENDED).to_vec()
    }

    pub fn top_providers(&self) -> &[Provider] {
        window(&self.providers, 0..TOP_PROVIDERS)
    }

    /// All derived sections computed from a single filtering pass.
    pub fn sections(&self) -> ListingSections<'_> {
        let filtered = self.filtered();
        ListingSections {
            deals: window(&filtered, DEALS).to_vec(),
            combos: window(&filtered, COMBOS).to_vec(),
            recommended: window(&filtered, RECOMMENDED).to_vec(),
            top_providers: self.top_providers(),
        }
    }
}

#[derive(Debug)]
pub struct ListingSections<'a> {
    pub deals: Vec<&'a Meal>,
    pub combos: Vec<&'a Meal>,
    pub recommended: Vec<&'a Meal>,
    pub top_providers: &'a [Provider],
}
