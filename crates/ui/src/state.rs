use cards::models::{Card, CardFilters, RawCreateCardRequest, SortField, SortOrder, UpdateCardRequest};
use cards::palette::{self, CARD_COLORS};
use serde::Deserialize;

/// One `<option>` of a select control.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: &str, label: &str, current: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected: value == current,
        }
    }
}

// --- List view ---

/// Query string of the list page.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListControls {
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub fill_color: Option<String>,
}

/// Current sort and filter selection of the list view.
#[derive(Debug, Clone, PartialEq)]
pub struct ListControls {
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub filter_color: Option<String>,
}

impl Default for ListControls {
    fn default() -> Self {
        Self {
            sort_by: SortField::Title,
            sort_order: SortOrder::Asc,
            filter_color: None,
        }
    }
}

impl ListControls {
    /// Unknown or missing values fall back to the defaults.
    pub fn from_query(raw: RawListControls) -> Self {
        let defaults = Self::default();
        Self {
            sort_by: raw
                .sort_by
                .as_deref()
                .and_then(SortField::parse)
                .unwrap_or(defaults.sort_by),
            sort_order: match raw.sort_order.as_deref() {
                None | Some("") => defaults.sort_order,
                Some(order) => SortOrder::parse(order),
            },
            filter_color: raw.fill_color.filter(|c| !c.is_empty()),
        }
    }

    pub fn to_filters(&self) -> CardFilters {
        CardFilters::with(self.filter_color.clone(), Some((self.sort_by, self.sort_order)))
    }

    pub fn sort_field_options(&self) -> Vec<SelectOption> {
        let current = self.sort_by.as_str();
        vec![
            SelectOption::new(SortField::Title.as_str(), "Title", current),
            SelectOption::new(SortField::Description.as_str(), "Description", current),
        ]
    }

    pub fn sort_order_options(&self) -> Vec<SelectOption> {
        let current = self.sort_order.as_str();
        vec![
            SelectOption::new(SortOrder::Asc.as_str(), "Ascending (A-Z)", current),
            SelectOption::new(SortOrder::Desc.as_str(), "Descending (Z-A)", current),
        ]
    }

    /// "All colors" followed by the palette.
    pub fn color_filter_options(&self) -> Vec<SelectOption> {
        let current = self.filter_color.as_deref().unwrap_or("");
        std::iter::once(SelectOption::new("", "All colors", current))
            .chain(CARD_COLORS.iter().map(|c| SelectOption::new(c.value, c.name, current)))
            .collect()
    }
}

/// Background for cards whose stored color is not in the palette.
pub const NEUTRAL_SWATCH: &str = "#FFFFFF";

/// A card as shown in the list grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CardItemView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub has_description: bool,
    pub fill_color: String,
    pub color_name: String,
    /// Only ever a palette value, since it is written into a `style` attribute.
    pub swatch_color: &'static str,
}

impl From<Card> for CardItemView {
    fn from(card: Card) -> Self {
        let color_name = palette::display_name(&card.fill_color).to_string();
        let swatch_color = palette::find_by_value(&card.fill_color)
            .map(|c| c.value)
            .unwrap_or(NEUTRAL_SWATCH);
        let description = card.description.unwrap_or_default();
        Self {
            id: card.id,
            title: card.title,
            has_description: !description.is_empty(),
            description,
            fill_color: card.fill_color,
            color_name,
            swatch_color,
        }
    }
}

// --- Create/Edit form ---

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

impl FormMode {
    pub fn heading(&self) -> &'static str {
        match self {
            FormMode::Create => "Create Card",
            FormMode::Edit { .. } => "Edit Card",
        }
    }

    pub fn action(&self) -> String {
        match self {
            FormMode::Create => "/cards/new".to_string(),
            FormMode::Edit { id } => format!("/cards/{}/edit", id),
        }
    }
}

/// Contents of the create/edit form, exactly as the user entered them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fill_color: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    pub title: Option<String>,
    pub fill_color: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.fill_color.is_none()
    }
}

impl CardForm {
    /// Create mode: empty fields, first palette color preselected.
    pub fn blank() -> Self {
        Self {
            fill_color: palette::default_color().value.to_string(),
            ..Default::default()
        }
    }

    /// Edit mode: seeded from the stored card.
    pub fn from_card(card: &Card) -> Self {
        Self {
            title: card.title.clone(),
            description: card.description.clone().unwrap_or_default(),
            fill_color: card.fill_color.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.title.trim().is_empty() {
            errors.title = Some("Title is required".to_string());
        }
        if self.fill_color.is_empty() {
            errors.fill_color = Some("Please select a color".to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// The palette, led by the current color when it is off-palette so an
    /// edit submits it back unchanged.
    pub fn color_options(&self) -> Vec<SelectOption> {
        let off_palette = (!self.fill_color.is_empty() && palette::find_by_value(&self.fill_color).is_none())
            .then(|| SelectOption::new(&self.fill_color, palette::display_name(&self.fill_color), &self.fill_color));

        off_palette
            .into_iter()
            .chain(CARD_COLORS.iter().map(|c| SelectOption::new(c.value, c.name, &self.fill_color)))
            .collect()
    }

    pub fn into_create_request(self) -> RawCreateCardRequest {
        RawCreateCardRequest {
            title: Some(self.title),
            description: Some(self.description),
            fill_color: Some(self.fill_color),
        }
    }

    /// Edit submits the whole form, so every field is present in the patch.
    pub fn into_update_request(self) -> UpdateCardRequest {
        UpdateCardRequest {
            title: Some(self.title),
            description: Some(Some(self.description)),
            fill_color: Some(self.fill_color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cards::models::{CardPatch, CreateCardRequest, DescriptionPatch};

    #[test]
    fn test_list_controls_defaults() {
        let controls = ListControls::from_query(RawListControls::default());
        assert_eq!(controls, ListControls::default());
        assert_eq!(
            controls.to_filters().sort(),
            Some((SortField::Title, SortOrder::Asc))
        );
        assert_eq!(controls.to_filters().fill_color(), None);
    }

    #[test]
    fn test_list_controls_from_query() {
        let controls = ListControls::from_query(RawListControls {
            sort_by: Some("description".into()),
            sort_order: Some("desc".into()),
            fill_color: Some("#69DB7C".into()),
        });
        assert_eq!(controls.sort_by, SortField::Description);
        assert_eq!(controls.sort_order, SortOrder::Desc);
        assert_eq!(controls.to_filters().fill_color(), Some("#69DB7C"));

        let fallback = ListControls::from_query(RawListControls {
            sort_by: Some("bogus".into()),
            sort_order: Some(String::new()),
            fill_color: Some(String::new()),
        });
        assert_eq!(fallback, ListControls::default());
    }

    #[test]
    fn test_color_filter_options_mark_selection() {
        let controls = ListControls {
            filter_color: Some("#F783AC".into()),
            ..Default::default()
        };
        let options = controls.color_filter_options();
        assert_eq!(options.len(), CARD_COLORS.len() + 1);
        assert_eq!(options[0].label, "All colors");
        assert!(!options[0].selected);

        let selected: Vec<_> = options.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].label, "Pink");

        let all = ListControls::default().color_filter_options();
        assert!(all[0].selected);
    }

    #[test]
    fn test_blank_form_preselects_first_color() {
        let form = CardForm::blank();
        assert_eq!(form.title, "");
        assert_eq!(form.fill_color, "#FF6B6B");

        let options = form.color_options();
        assert!(options[0].selected);
        assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
    }

    #[test]
    fn test_off_palette_color_is_kept_as_first_option() {
        let form = CardForm {
            title: "A".into(),
            description: String::new(),
            fill_color: "#000000".into(),
        };
        let options = form.color_options();
        assert_eq!(options.len(), CARD_COLORS.len() + 1);
        assert_eq!(options[0].value, "#000000");
        assert_eq!(options[0].label, "Unknown");
        assert!(options[0].selected);
        assert_eq!(options.iter().filter(|o| o.selected).count(), 1);

        let empty = CardForm::default().color_options();
        assert_eq!(empty.len(), CARD_COLORS.len());
        assert!(empty.iter().all(|o| !o.selected));
    }

    #[test]
    fn test_card_item_swatch_uses_palette_only() {
        let card = |fill_color: &str| Card {
            id: "id".into(),
            title: "t".into(),
            description: None,
            fill_color: fill_color.into(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let view = CardItemView::from(card("#748FFC"));
        assert_eq!(view.swatch_color, "#748FFC");
        assert_eq!(view.color_name, "Blue");

        let view = CardItemView::from(card("red;background-image:url(x)"));
        assert_eq!(view.swatch_color, NEUTRAL_SWATCH);
        assert_eq!(view.color_name, "Unknown");
        assert!(!view.has_description);
    }

    #[test]
    fn test_validate_trims_title() {
        let form = CardForm {
            title: "   ".into(),
            ..CardForm::blank()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.title.is_some());
        assert!(errors.fill_color.is_none());

        let form = CardForm {
            title: " ok ".into(),
            ..CardForm::blank()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_color() {
        let form = CardForm {
            title: "A".into(),
            description: String::new(),
            fill_color: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.title.is_none());
        assert!(errors.fill_color.is_some());
    }

    #[test]
    fn test_form_requests() {
        let form = CardForm {
            title: "A".into(),
            description: String::new(),
            fill_color: "#FF6B6B".into(),
        };

        let create = CreateCardRequest::new(form.clone().into_create_request()).unwrap();
        assert_eq!(create.description(), None);

        let patch = CardPatch::new(form.into_update_request()).unwrap();
        assert_eq!(patch.title(), Some("A"));
        assert_eq!(patch.description(), &DescriptionPatch::Clear);
        assert_eq!(patch.fill_color(), Some("#FF6B6B"));
    }

    #[test]
    fn test_form_modes() {
        assert_eq!(FormMode::Create.action(), "/cards/new");
        assert_eq!(FormMode::Edit { id: "abc".into() }.action(), "/cards/abc/edit");
        assert_eq!(FormMode::Create.heading(), "Create Card");
    }
}
