//! Navigation bar with a collapsible mobile menu

use smallvec::SmallVec;

use folio_animation::AnimationScope;
use folio_core::ElementId;

use super::{MountContext, Section};
use crate::content::{NavLink, LOGO};
use crate::page::{Extent, NodeSpec, MD_BREAKPOINT};

pub const NAVBAR_HEIGHT: f32 = 64.0;

pub struct Navbar {
    root: ElementId,
    logo: ElementId,
    menu_button: ElementId,
    links: SmallVec<[(NavLink, ElementId); 5]>,
    menu_open: bool,
    scope: AnimationScope,
}

impl Navbar {
    pub fn mount(ctx: &mut MountContext<'_>) -> Self {
        let page = &mut *ctx.page;
        let parent = page.root();
        let root = page.create_node(
            parent,
            NodeSpec::row(MD_BREAKPOINT)
                .extent(Extent::Fixed(NAVBAR_HEIGHT))
                .padding(12.0)
                .label("navbar"),
        );
        let logo = page.create_leaf(root, NodeSpec::fixed(40.0).label("nav.logo"), LOGO);
        let links = NavLink::ALL
            .into_iter()
            .map(|link| {
                let id = page.create_leaf(
                    root,
                    NodeSpec::fixed(40.0).label(format!("nav.{}", link.anchor())),
                    link.label(),
                );
                (link, id)
            })
            .collect();
        let menu_button = page.create_leaf(root, NodeSpec::fixed(40.0).label("nav.menu"), "menu");

        Self {
            root,
            logo,
            menu_button,
            links,
            menu_open: false,
            scope: AnimationScope::new("navbar"),
        }
    }

    pub fn logo(&self) -> ElementId {
        self.logo
    }

    pub fn menu_button(&self) -> ElementId {
        self.menu_button
    }

    /// Element of a navigation link
    pub fn link(&self, link: NavLink) -> Option<ElementId> {
        self.links.iter().find(|(l, _)| *l == link).map(|(_, id)| *id)
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        tracing::debug!("navbar: menu {}", if self.menu_open { "opened" } else { "closed" });
        self.menu_open
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }
}

impl Section for Navbar {
    fn name(&self) -> &'static str {
        "navbar"
    }

    fn root(&self) -> ElementId {
        self.root
    }

    fn scope(&self) -> &AnimationScope {
        &self.scope
    }

    fn scope_mut(&mut self) -> &mut AnimationScope {
        &mut self.scope
    }

    fn on_click(&mut self, target: ElementId) -> Option<NavLink> {
        if target == self.menu_button {
            self.toggle_menu();
            return None;
        }
        if target == self.logo {
            self.close_menu();
            return Some(NavLink::Home);
        }
        let link = self.links.iter().find(|(_, id)| *id == target).map(|(l, _)| *l)?;
        self.close_menu();
        Some(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;
    use folio_animation::ScrollTriggerCoordinator;
    use folio_core::Size;
    use folio_theme::ColorScheme;

    fn mount() -> (Page, Navbar) {
        let mut page = Page::new(Size::new(400.0, 800.0));
        let coordinator = ScrollTriggerCoordinator::new();
        let navbar = Navbar::mount(&mut MountContext {
            page: &mut page,
            coordinator: &coordinator,
            scheme: ColorScheme::Light,
        });
        (page, navbar)
    }

    #[test]
    fn test_link_click_closes_menu() {
        let (_page, mut navbar) = mount();
        navbar.on_click(navbar.menu_button());
        assert!(navbar.is_menu_open());

        let about = navbar.link(NavLink::About).unwrap();
        assert_eq!(navbar.on_click(about), Some(NavLink::About));
        assert!(!navbar.is_menu_open());
    }

    #[test]
    fn test_menu_button_toggles() {
        let (_page, mut navbar) = mount();
        assert_eq!(navbar.on_click(navbar.menu_button()), None);
        assert!(navbar.is_menu_open());
        assert_eq!(navbar.on_click(navbar.menu_button()), None);
        assert!(!navbar.is_menu_open());
    }

    #[test]
    fn test_links_are_mounted_in_order() {
        let (page, navbar) = mount();
        let labels: Vec<_> = page
            .children(navbar.root())
            .iter()
            .filter_map(|id| page.content(*id))
            .collect();
        assert_eq!(labels, ["Gautam", "Home", "About", "Skill", "Project", "Contact", "menu"]);
        assert_eq!(page.find("nav.skill"), navbar.link(NavLink::Skill));
    }
}
