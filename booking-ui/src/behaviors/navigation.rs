//! Mobile menu and in-page anchor scrolling.

pub const MENU_BUTTON_ID: &str = "mobile-menu-button";
pub const MENU_ID: &str = "mobile-menu";
pub const HIDDEN_CLASS: &str = "hidden";

/// Links whose target is an element on the same page.
pub const IN_PAGE_ANCHORS: &str = r##"a[href^="#"]"##;

/// Whether the mobile menu is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuVisibility {
    Shown,
    Hidden,
}

impl MenuVisibility {
    pub fn from_hidden_class(hidden: bool) -> Self {
        if hidden {
            MenuVisibility::Hidden
        } else {
            MenuVisibility::Shown
        }
    }

    pub fn is_hidden(self) -> bool {
        self == MenuVisibility::Hidden
    }

    pub fn toggled(self) -> Self {
        match self {
            MenuVisibility::Shown => MenuVisibility::Hidden,
            MenuVisibility::Hidden => MenuVisibility::Shown,
        }
    }
}

/// Where a click landed relative to the menu and its toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickRegion {
    /// On (or inside) the toggle button.
    Toggle,
    /// Inside the menu container.
    Menu,
    /// Anywhere else.
    Outside,
}

/// Menu visibility after a click.
///
/// The toggle flips it, clicks inside the menu leave it alone and clicks
/// anywhere else hide it.
pub fn menu_after_click(current: MenuVisibility, region: ClickRegion) -> MenuVisibility {
    match region {
        ClickRegion::Toggle => current.toggled(),
        ClickRegion::Menu => current,
        ClickRegion::Outside => MenuVisibility::Hidden,
    }
}

/// The selector an in-page link points at, if it is one.
///
/// The `href` is used verbatim as a selector, so `#` alone yields a
/// selector that matches nothing.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.starts_with('#').then_some(href)
}
