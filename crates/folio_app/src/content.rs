//! Static page content
//!
//! Copy, links and asset names for every section. Nothing here changes at
//! runtime except which project image is shown for the active theme.

use folio_theme::ColorScheme;

// =============================================================================
// Navigation
// =============================================================================

/// Brand text shown in the navbar
pub const LOGO: &str = "Gautam";

/// In-page navigation targets, in navbar order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavLink {
    Home,
    About,
    Skill,
    Project,
    Contact,
}

impl NavLink {
    pub const ALL: [NavLink; 5] = [
        NavLink::Home,
        NavLink::About,
        NavLink::Skill,
        NavLink::Project,
        NavLink::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NavLink::Home => "Home",
            NavLink::About => "About",
            NavLink::Skill => "Skill",
            NavLink::Project => "Project",
            NavLink::Contact => "Contact",
        }
    }

    /// Fragment id of the section the link scrolls to
    pub fn anchor(self) -> &'static str {
        match self {
            NavLink::Home => "home",
            NavLink::About => "about",
            NavLink::Skill => "skill",
            NavLink::Project => "project",
            NavLink::Contact => "contact",
        }
    }

    /// Parse a label or anchor, case-insensitively, with an optional `#`
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().trim_start_matches('#');
        Self::ALL.into_iter().find(|link| {
            link.anchor().eq_ignore_ascii_case(value) || link.label().eq_ignore_ascii_case(value)
        })
    }
}

// =============================================================================
// Hero
// =============================================================================

pub const HERO_NAME: &str = "Gautam Mishra";
pub const HERO_HEADING: &str = "Hi, I’m Gautam Mishra";
pub const HERO_TAGLINE: &str = "I’m a passionate Full-Stack Developer who loves building modern web applications with clean design and powerful functionality.";
pub const HERO_IMAGE: &str = "profile.png";

/// Call-to-action buttons: label and the section they jump to
pub const HERO_ACTIONS: [(&str, NavLink); 2] = [
    ("View My Work", NavLink::Project),
    ("Contact Me", NavLink::Contact),
];

// =============================================================================
// About
// =============================================================================

pub const ABOUT_HEADING: &str = "About me";

pub const ABOUT_INTRO: &str = "Hi, I’m Gautam Mishra, a self-driven Full Stack Developer who loves turning ideas into real, working web products. I enjoy building everything from small interactive interfaces to complex backend systems. My projects reflect my passion for problem-solving, clean code, and modern web technologies.";

pub const ABOUT_EDUCATION_HEADING: &str = "Education:";

pub const ABOUT_EDUCATION: &str = "I'm an aspiring software developer currently pursuing a B.Tech degree in Computer Science and Engineering from Calcutta Institute of Engineering And Management, with an expected graduation in 2027, focusing on web development, algorithms, data structures, and databases.";

pub const CV_LABEL: &str = "Download CV";
pub const CV_FILE: &str = "Gautam_Mishra_CV.pdf";

// =============================================================================
// Skills
// =============================================================================

pub const SKILLS_HEADING: &str = "Skills";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub icon: &'static str,
    /// Dark logo that needs inverting on a dark background
    pub invert_in_dark: bool,
}

const fn skill(name: &'static str, icon: &'static str) -> Skill {
    Skill {
        name,
        icon,
        invert_in_dark: false,
    }
}

pub const SKILLS: [Skill; 9] = [
    skill("HTML", "html.png"),
    skill("CSS", "css.png"),
    skill("JavaScript", "js.png"),
    skill("React", "react.png"),
    skill("Node.js", "node.png"),
    Skill {
        name: "Express",
        icon: "express.png",
        invert_in_dark: true,
    },
    skill("MongoDB", "mongodb.png"),
    skill("GSAP", "gsap.png"),
    skill("Tailwind", "tailwind.png"),
];

// =============================================================================
// Projects
// =============================================================================

pub const PROJECTS_HEADING: &str = "Projects";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    /// Replacement screenshot for the dark theme
    pub dark_image: Option<&'static str>,
    /// Deployed site, if any
    pub live: Option<&'static str>,
    pub github: &'static str,
}

impl Project {
    pub fn image_for(&self, scheme: ColorScheme) -> &'static str {
        match (scheme, self.dark_image) {
            (ColorScheme::Dark, Some(dark)) => dark,
            _ => self.image,
        }
    }
}

pub static PROJECTS: [Project; 4] = [
    Project {
        title: "ChatsGPT",
        description: "ChatsGPT is a web-based AI chat app where users can send text or image prompts, and the AI responds with text or generated images. It uses Google Gemini and ImageKit for AI-powered content generation and delivery.",
        image: "chatsGptLight.png",
        dark_image: Some("chatsGptDark.png"),
        live: Some("https://chatsgpt.onrender.com/"),
        github: "https://github.com/07Gautammishra/chatsgpt",
    },
    Project {
        title: "Product Management",
        description: "A full-stack product management system for adding, updating, create, delete with persistence.",
        image: "project2light.png",
        dark_image: Some("project2dark.png"),
        live: Some("https://product-store-yzjc.onrender.com/"),
        github: "https://github.com/07Gautammishra/firstMernProject",
    },
    Project {
        title: "NovaByte",
        description: "A gaming-themed landing page built with HTML, CSS, and JavaScript, featuring a futuristic design, hero section with “REDEFINE Gaming,” a nav bar, and a watch trailer button, showcasing layout, design, and basic interactivity for beginners.",
        image: "novabyte.png",
        dark_image: None,
        live: Some("https://07gautammishra.github.io/firstGamingWeb/"),
        github: "https://github.com/07Gautammishra/firstGamingWeb",
    },
    Project {
        title: "X Clone",
        description: "A clone of the X timeline with posting, profiles and a responsive three-column layout.",
        image: "project4.png",
        dark_image: None,
        live: None,
        github: "https://github.com/07Gautammishra/x-clone",
    },
];

// =============================================================================
// Contact
// =============================================================================

pub const CONTACT_HEADING: &str = "Contact Me";
pub const SEND_LABEL: &str = "Send Message";
pub const SENDING_LABEL: &str = "Sending...";
pub const SENT_NOTICE: &str = "Message Sent Successfully!";
pub const SEND_FAILED: &str = "Something went wrong. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SocialLink {
    pub name: &'static str,
    pub url: &'static str,
}

pub const SOCIAL_LINKS: [SocialLink; 3] = [
    SocialLink {
        name: "GitHub",
        url: "https://github.com/07Gautammishra",
    },
    SocialLink {
        name: "LinkedIn",
        url: "https://www.linkedin.com/in/gautam-mishra-32102a361/",
    },
    SocialLink {
        name: "Instagram",
        url: "https://www.instagram.com/gautammishra1000/",
    },
];
