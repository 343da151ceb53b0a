//! Markup contract of the target sign-up site.
//!
//! The site addresses its widgets through `data-cy` attributes. Keeping
//! every selector behind a builder here means a markup change on their
//! side is a one-module fix on ours.

use crate::port::Selector;

fn data_cy(value: &str) -> Selector {
    Selector::css(format!("[data-cy=\"{value}\"]"))
}

/// Container on the homepage listing the currently open sign-ups.
pub fn open_events_container() -> Selector {
    data_cy("homepage-signup-open-events")
}

/// Anchor children of the open-events container; text is the event name,
/// `href` its registration page.
pub fn open_event_links() -> Selector {
    Selector::css("[data-cy=\"homepage-signup-open-events\"] a")
}

/// The index-th quota's sign-up link on an event page, numbered top to
/// bottom from zero.
pub fn quota_signup_link(index: u32) -> Selector {
    data_cy(&format!("eventpage-quotas-link-{index}"))
}

/// The registration form on the sign-up page.
pub fn signup_form() -> Selector {
    Selector::css("form")
}

/// Input fields of the registration form, identified by their `id`.
pub fn form_inputs() -> Selector {
    Selector::css("form input")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_link_embeds_the_ordinal() {
        assert_eq!(
            quota_signup_link(0).as_str(),
            "[data-cy=\"eventpage-quotas-link-0\"]"
        );
        assert_eq!(
            quota_signup_link(17).as_str(),
            "[data-cy=\"eventpage-quotas-link-17\"]"
        );
    }

    #[test]
    fn open_events_selectors_share_the_container() {
        assert!(open_event_links()
            .as_str()
            .starts_with(open_events_container().as_str()));
    }
}
