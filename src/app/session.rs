use crate::core::cart::Cart;
use crate::core::catalog::CatalogStore;
use crate::core::filter::CourseFilter;
use crate::core::rating::{needs_rating_count, set_rating};
use crate::domain::model::{Course, Rating, ALL_SUBJECTS};
use crate::utils::error::{CatalogError, Result};
use std::collections::BTreeSet;
use std::sync::Arc;

/// A user action against the browser state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetSubject(String),
    SetQuery(String),
    Filter(CourseFilter),
    AddToCart(String),
    RemoveFromCart(String),
    /// Add when absent, remove when present.
    ToggleCart(String),
    Rate { number: String, rating: Rating },
    ToggleExpanded(String),
    OpenSections(String),
    CloseSections,
}

/// Immutable snapshot of the browser. `apply` returns the next snapshot and
/// never changes the receiver.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Arc<CatalogStore>,
    filter: CourseFilter,
    filtered: Vec<Course>,
    cart: Cart,
    completed: Vec<Course>,
    expanded: BTreeSet<String>,
    open_sections: Option<String>,
}

impl Session {
    pub fn new(catalog: CatalogStore) -> Self {
        let filter = CourseFilter::default();
        let filtered = filter.apply(catalog.courses());
        let completed = catalog.completed().to_vec();

        Self {
            catalog: Arc::new(catalog),
            filter,
            filtered,
            cart: Cart::new(),
            completed,
            expanded: BTreeSet::new(),
            open_sections: None,
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn filter(&self) -> &CourseFilter {
        &self.filter
    }

    pub fn filtered(&self) -> &[Course] {
        &self.filtered
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn completed(&self) -> &[Course] {
        &self.completed
    }

    pub fn needs_rating_count(&self) -> usize {
        needs_rating_count(&self.completed)
    }

    pub fn is_expanded(&self, number: &str) -> bool {
        self.expanded.contains(number)
    }

    /// Course whose sections are being viewed, if any.
    pub fn open_sections(&self) -> Option<&Course> {
        self.open_sections
            .as_deref()
            .and_then(|number| self.catalog.find(number))
    }

    pub fn apply(&self, action: Action) -> Result<Session> {
        tracing::debug!(?action, "Applying action");

        match action {
            Action::SetSubject(subject) => {
                self.refilter(CourseFilter::new(subject, self.filter.query.clone()))
            }
            Action::SetQuery(query) => {
                self.refilter(CourseFilter::new(self.filter.subject.clone(), query))
            }
            Action::Filter(filter) => self.refilter(filter),
            Action::AddToCart(number) => {
                let course = self.catalog_course(&number)?;
                Ok(Session {
                    cart: self.cart.add(course),
                    ..self.clone()
                })
            }
            Action::RemoveFromCart(number) => {
                let course = self.catalog_course(&number)?;
                Ok(Session {
                    cart: self.cart.remove(course),
                    ..self.clone()
                })
            }
            Action::ToggleCart(number) => {
                if self.cart.contains(&number) {
                    self.apply(Action::RemoveFromCart(number))
                } else {
                    self.apply(Action::AddToCart(number))
                }
            }
            Action::Rate { number, rating } => {
                if !self.completed.iter().any(|c| c.number == number) {
                    return Err(CatalogError::UnknownCourse { number });
                }
                Ok(Session {
                    completed: set_rating(&self.completed, &number, rating),
                    ..self.clone()
                })
            }
            Action::ToggleExpanded(number) => {
                let known = self.catalog.find(&number).is_some()
                    || self.completed.iter().any(|c| c.number == number);
                if !known {
                    return Err(CatalogError::UnknownCourse { number });
                }

                let mut expanded = self.expanded.clone();
                if !expanded.remove(&number) {
                    expanded.insert(number);
                }
                Ok(Session {
                    expanded,
                    ..self.clone()
                })
            }
            Action::OpenSections(number) => {
                self.catalog_course(&number)?;
                Ok(Session {
                    open_sections: Some(number),
                    ..self.clone()
                })
            }
            Action::CloseSections => Ok(Session {
                open_sections: None,
                ..self.clone()
            }),
        }
    }

    fn refilter(&self, filter: CourseFilter) -> Result<Session> {
        if filter.subject != ALL_SUBJECTS && !self.catalog.has_subject(&filter.subject) {
            return Err(CatalogError::UnknownSubject {
                subject: filter.subject,
            });
        }

        let filtered = filter.apply(self.catalog.courses());
        Ok(Session {
            filter,
            filtered,
            ..self.clone()
        })
    }

    fn catalog_course(&self, number: &str) -> Result<&Course> {
        self.catalog
            .find(number)
            .ok_or_else(|| CatalogError::UnknownCourse {
                number: number.to_string(),
            })
    }
}
