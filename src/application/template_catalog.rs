// Template catalog - Read-only widget library injected into the editor
use crate::domain::drag::TemplateRef;
use crate::domain::widget::WidgetTemplate;
use std::collections::HashSet;
use std::sync::Arc;

/// Loaded once at startup and shared by every editor session.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Arc<[WidgetTemplate]>,
}

impl TemplateCatalog {
    /// Build a catalog, keeping the first template for any repeated id.
    pub fn new(templates: Vec<WidgetTemplate>) -> Self {
        let mut seen = HashSet::new();
        let templates: Vec<WidgetTemplate> = templates
            .into_iter()
            .filter(|template| {
                let fresh = seen.insert(template.id.clone());
                if !fresh {
                    tracing::warn!(template_id = %template.id, "Ignoring duplicate widget template");
                }
                fresh
            })
            .collect();

        Self {
            templates: templates.into(),
        }
    }

    pub fn templates(&self) -> &[WidgetTemplate] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&WidgetTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    /// A full template in the payload wins; a bare id is looked up.
    pub fn resolve(&self, template: &TemplateRef) -> Option<WidgetTemplate> {
        match template {
            TemplateRef::Full(template) => Some(template.clone()),
            TemplateRef::Id(id) => self.get(id).cloned(),
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::widget::WidgetKind;
    use serde_json::json;

    pub(crate) fn sample_template(id: &str, kind: WidgetKind) -> WidgetTemplate {
        WidgetTemplate {
            id: id.to_string(),
            title: id.replace('-', " "),
            description: String::new(),
            kind,
            icon: None,
            default_config: json!({ "color": "blue" }),
            default_data: json!({ "description": id }),
        }
    }

    pub(crate) fn sample_catalog() -> TemplateCatalog {
        TemplateCatalog::new(vec![
            sample_template("active-jobs", WidgetKind::Metric),
            sample_template("jobs-by-status", WidgetKind::Chart),
            sample_template("resource-status", WidgetKind::Table),
            sample_template("completion-rate", WidgetKind::Progress),
        ])
    }

    #[test]
    fn test_resolve_by_id_and_full() {
        let catalog = sample_catalog();

        let by_id = catalog.resolve(&TemplateRef::Id("jobs-by-status".to_string()));
        assert_eq!(by_id.map(|t| t.kind), Some(WidgetKind::Chart));

        assert!(catalog.resolve(&TemplateRef::Id("missing".to_string())).is_none());

        let adhoc = sample_template("not-in-catalog", WidgetKind::Table);
        assert_eq!(catalog.resolve(&TemplateRef::Full(adhoc.clone())), Some(adhoc));
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let mut second = sample_template("active-jobs", WidgetKind::Chart);
        second.title = "Shadow".to_string();
        let catalog = TemplateCatalog::new(vec![
            sample_template("active-jobs", WidgetKind::Metric),
            second,
        ]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("active-jobs").map(|t| t.kind), Some(WidgetKind::Metric));
    }
}
