use crate::domain::model::Course;

/// Courses selected for enrollment, unique by number, in insertion order.
///
/// Updates return a new cart and leave the receiver untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    courses: Vec<Course>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn contains(&self, number: &str) -> bool {
        self.courses.iter().any(|c| c.number == number)
    }

    pub fn total_credits(&self) -> f64 {
        self.courses.iter().map(|c| c.credits).sum()
    }

    #[must_use]
    pub fn add(&self, course: &Course) -> Cart {
        if self.contains(&course.number) {
            tracing::info!("{} is already in the cart", course.number);
            return self.clone();
        }

        let mut courses = self.courses.clone();
        courses.push(course.clone());
        tracing::debug!(course = %course.number, size = courses.len(), "Added course to cart");
        Cart { courses }
    }

    #[must_use]
    pub fn remove(&self, course: &Course) -> Cart {
        self.remove_number(&course.number)
    }

    #[must_use]
    pub fn remove_number(&self, number: &str) -> Cart {
        let courses: Vec<Course> = self
            .courses
            .iter()
            .filter(|c| c.number != number)
            .cloned()
            .collect();

        if courses.len() != self.courses.len() {
            tracing::debug!(course = number, size = courses.len(), "Removed course from cart");
        }
        Cart { courses }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn course(number: &str, credits: f64) -> Course {
        Course {
            number: number.to_string(),
            name: String::new(),
            subject: "CS".to_string(),
            credits,
            description: String::new(),
            keywords: Vec::new(),
            requisites: Vec::new(),
            sections: Vec::new(),
            rating: None,
        }
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let cart = Cart::new()
            .add(&course("CS300", 3.0))
            .add(&course("CS200", 3.0))
            .add(&course("MATH221", 5.0));

        let numbers: Vec<&str> = cart.courses().iter().map(|c| c.number.as_str()).collect();
        assert_eq!(numbers, vec!["CS300", "CS200", "MATH221"]);
        assert_eq!(cart.total_credits(), 11.0);
    }

    #[test]
    fn test_duplicate_add_is_noop_by_number() {
        let original = course("CS300", 3.0);
        let mut renamed = course("CS300", 4.0);
        renamed.name = "Different record".to_string();

        let cart = Cart::new().add(&original);
        let again = cart.add(&renamed);

        assert_eq!(again, cart);
        assert_eq!(again.courses()[0].credits, 3.0);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let cart = Cart::new().add(&course("CS300", 3.0));
        assert_eq!(cart.remove(&course("CS400", 3.0)), cart);
        assert!(Cart::new().remove_number("CS300").is_empty());
    }

    #[test]
    fn test_updates_do_not_touch_previous_cart() {
        let before = Cart::new().add(&course("CS300", 3.0));
        let after = before.add(&course("CS400", 3.0)).remove_number("CS300");

        assert_eq!(before.len(), 1);
        assert!(before.contains("CS300"));
        assert!(!after.contains("CS300"));
        assert!(after.contains("CS400"));
    }

    fn arb_cart() -> impl Strategy<Value = Cart> {
        prop::collection::vec(0u8..12, 0..10).prop_map(|ids| {
            ids.into_iter()
                .fold(Cart::new(), |cart, id| cart.add(&course(&format!("C{}", id), 3.0)))
        })
    }

    proptest! {
        #[test]
        fn prop_readd_after_remove_has_one_instance(cart in arb_cart(), id in 0u8..12) {
            let c = course(&format!("C{}", id), 3.0);
            let result = cart.add(&c).remove(&c).add(&c);
            let count = result.courses().iter().filter(|x| x.number == c.number).count();
            prop_assert_eq!(count, 1);
        }

        #[test]
        fn prop_double_add_equals_single_add(cart in arb_cart(), id in 0u8..12) {
            let c = course(&format!("C{}", id), 3.0);
            prop_assert_eq!(cart.add(&c).add(&c), cart.add(&c));
        }

        #[test]
        fn prop_cart_never_holds_duplicates(cart in arb_cart()) {
            let numbers: Vec<&str> = cart.courses().iter().map(|c| c.number.as_str()).collect();
            for (i, n) in numbers.iter().enumerate() {
                prop_assert!(!numbers[i + 1..].contains(n));
            }
        }
    }
}
