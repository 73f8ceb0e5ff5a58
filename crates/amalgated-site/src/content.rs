//! Static page content.
//!
//! Everything here is immutable and shared by reference; sections only read
//! it. Local images are named by asset key and resolved through
//! [`AssetRegistry`](crate::assets::AssetRegistry); remote photos are plain
//! URLs.

use crate::format::{CountFormat, Grouping};

pub const COMPANY: &str = "The Amalgated Group";
pub const HOLDINGS: &str = "Amalgated Holdings";

pub const LOGO: &str = "Amalgated_holdings.png";
pub const ABOUT_IMAGE: &str = "about-us-section.jpg";
pub const RETAIL_HERO_IMAGE: &str = "retail-hero.jpg";
pub const ASSET_MANAGEMENT_IMAGE: &str = "asset-management-section.jpg";
pub const CTA_IMAGE: &str = "cta-business-environment.png";
pub const HERO_VIDEO: &str = "AH.mp4";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Milestone {
    pub year: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub image_alt: &'static str,
    pub badge: Option<Badge>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub detail: &'static str,
}

pub const MILESTONES: &[Milestone] = &[
    Milestone {
        year: "2024",
        title: "M. Conpinco Cyclehouse (MCCI) & Amalgated Global Computek (AGC)",
        description: "IT Technologies & Business Solutions.",
        image: "https://images.unsplash.com/photo-1497366216548-37526070297c?w=800",
        image_alt: "Modern corporate office – IT and business solutions",
        badge: None,
    },
    Milestone {
        year: "2023",
        title: "Amalgated Land & Development Corporation (ALDC)",
        description: "Amalgated Industries & Construction Corporation (AICC).",
        image: "https://images.unsplash.com/photo-1524661135-423995f22d0b?w=800",
        image_alt: "Land development and construction",
        badge: None,
    },
    Milestone {
        year: "2018",
        title: "Amalgated World Import Corporation (AWIC)",
        description: "Import & Export Services.",
        image: "https://images.unsplash.com/photo-1586528116311-ad8dd3c8310d?w=800",
        image_alt: "Import and export services",
        badge: None,
    },
    Milestone {
        year: "2016",
        title: "Amalgated Properties & Management Corporation (APMC)",
        description: "Officially operational.",
        image: "https://images.unsplash.com/photo-1579621970563-ebec7560ff3e?w=800",
        image_alt: "Properties and management operations",
        badge: None,
    },
    Milestone {
        year: "2015",
        title: "Launched",
        description: "Amalgated Lending Inc. (ALI) • M. Conpinco Home Improvement Supercenter • LPG & other gas retail operations.",
        image: "https://images.unsplash.com/photo-1586528116311-ad8dd3c8310d?w=800",
        image_alt: "Lending, retail and LPG operations",
        badge: Some(Badge {
            label: "New entities",
            detail: "ALI, M. Conpinco, LPG retail",
        }),
    },
    Milestone {
        year: "2010",
        title: "Incorporated as Amalgated Capital Inc. (ACI)",
        description: "Focused on office, commercial & residential leasing.",
        image: "https://images.unsplash.com/photo-1504384308090-c894fdcc538d?w=800",
        image_alt: "Office, commercial and residential leasing",
        badge: None,
    },
];

pub const ABOUT_SECTORS: &[&str] = &[
    "Real Estate & Asset Management",
    "Retail & Distribution",
    "Lending & Financial Services",
    "LPG Retail Operations",
    "IT & Technology Services",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueCard {
    pub title: &'static str,
    pub description: &'static str,
}

pub const PHILOSOPHY_CARDS: &[&str] = &["Compassion", "Excellence", "Teamwork", "Service"];

pub const CORE_VALUES: &[ValueCard] = &[
    ValueCard {
        title: "Compassionate",
        description: "We care about the well-being and the success of every person we serve. We make a difference in every community we serve.",
    },
    ValueCard {
        title: "Leadership",
        description: "We respect, we listen to our people and get things done.",
    },
    ValueCard {
        title: "Integrity",
        description: "We will hold to our convictions regardless of the consequences and never compromise our values even if it affects our bottom line.",
    },
    ValueCard {
        title: "Excellence",
        description: "High standards are a way of life. We pursue excellence in everything we do.",
    },
    ValueCard {
        title: "Nurtureship",
        description: "We help everyone to learn, to maximize their performance by unlocking their potential. We give everyone the path to find answers, not the answer.",
    },
    ValueCard {
        title: "Teamwork",
        description: "We work as a team toward a common vision. By getting everyone in the organization rowing in the same direction we will dominate any competition, at any time.",
    },
    ValueCard {
        title: "Sense of Urgency",
        description: "We believe in getting goals done now in a short period of time to avoid losses.",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Company {
    pub name: &'static str,
    pub image: &'static str,
}

pub const REAL_ESTATE_SERVICES: &[&str] = &[
    "Property Acquisition",
    "Property Management",
    "Office Space Leasing",
    "Residential & Commercial Leasing",
    "Joint Venture & Partnership Programs",
];

pub const REAL_ESTATE_COMPANIES: &[Company] = &[
    Company {
        name: "Amalgated Capital Inc.",
        image: "amalgated-capital-inc.png",
    },
    Company {
        name: "Amalgated Properties & Management Corp.",
        image: "amalgated-properties-management.png",
    },
    Company {
        name: "Amalgated Land & Development Corp.",
        image: "amalgated-land-development.png",
    },
];

/// `(url, alt)`
pub const REAL_ESTATE_IMAGES: &[(&str, &str)] = &[
    (
        "https://images.unsplash.com/photo-1486406146926-c627a92ad1ab?w=800",
        "Commercial real estate building",
    ),
    (
        "https://images.unsplash.com/photo-1497366216548-37526070297c?w=600",
        "Office space leasing",
    ),
    (
        "https://images.unsplash.com/photo-1560518883-ce09059eeffa?w=600",
        "Residential and commercial property",
    ),
];

pub const RETAIL_SERVICES: &[&str] = &[
    "Pryce Gas Products – Retail & Distribution",
    "FAMES – Furniture, Appliances, Equipment",
    "Corporate Accounts & Government Supply",
    "Imported Goods – Retail",
];

pub const RETAIL_BRANDS: &[Company] = &[
    Company {
        name: "M. Conpinco",
        image: "brand-m-conpinco.png",
    },
    Company {
        name: "AWIC",
        image: "brand-awic.png",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServiceCategory {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

pub const SERVICE_CATEGORIES: &[ServiceCategory] = &[
    ServiceCategory {
        title: "Lending (Amalgated Lending)",
        items: &[
            "REM (Real Estate Mortgage) Loans",
            "SSS / GSIS / Pension Loans",
            "Travel Assistance Loans",
        ],
    },
    ServiceCategory {
        title: "IT & Technology (AGC)",
        items: &[
            "IT Devices Retail Sales",
            "Software & Web Development",
            "Import & Export Services",
            "E-Commerce Solutions",
        ],
    },
    ServiceCategory {
        title: "Construction Services",
        items: &[
            "Equipment Sales & Rentals",
            "Construction & Infrastructure Services",
        ],
    },
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoadmapCard {
    pub category: &'static str,
    pub count_end: f64,
    pub value_suffix: Option<&'static str>,
    pub unit: &'static str,
    pub description: &'static str,
}

impl RoadmapCard {
    pub fn format(&self) -> CountFormat {
        CountFormat::plain().grouping(Grouping::AtLeast(1000.0))
    }
}

pub const PROJECT_101_CARDS: &[RoadmapCard] = &[
    RoadmapCard {
        category: "Target Growth",
        count_end: 10.0,
        value_suffix: Some("Billion"),
        unit: "USD 200 Million",
        description: "Combined fixed and financing assets",
    },
    RoadmapCard {
        category: "Development",
        count_end: 101.0,
        value_suffix: None,
        unit: "Buildings, Facilities & Branches",
        description: "Nationwide presence",
    },
    RoadmapCard {
        category: "Network",
        count_end: 1001.0,
        value_suffix: None,
        unit: "Agents",
        description: "LPG retail outlets nationwide",
    },
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AssetStat {
    pub end: f64,
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub decimals: Option<u8>,
    pub label: &'static str,
}

impl AssetStat {
    const fn count(end: f64, suffix: &'static str, label: &'static str) -> Self {
        Self {
            end,
            prefix: "",
            suffix,
            decimals: None,
            label,
        }
    }

    pub fn format(&self) -> CountFormat {
        let base = CountFormat::plain().prefix(self.prefix).suffix(self.suffix);
        match self.decimals {
            Some(d) => base.decimals(d),
            None => base.grouping(Grouping::Always),
        }
    }
}

pub const ASSET_ITEMS: &[AssetStat] = &[
    AssetStat::count(90.0, "+", "Commercial Real Estate Properties Nationwide"),
    AssetStat::count(12.0, "", "Residential Real Estate Properties"),
    AssetStat::count(37.0, "+", "Retail & Sales Centers"),
    AssetStat::count(10.0, "", "Retail Centers (FAMES)"),
    AssetStat::count(6.0, "", "Lending Centers"),
    AssetStat::count(15.0, "", "LPG Centers"),
    AssetStat {
        end: 4.4,
        prefix: "Close to PHP ",
        suffix: " Billion",
        decimals: Some(1),
        label: "Lease Receivables",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientCategory {
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
}

pub const CLIENT_CATEGORIES: &[ClientCategory] = &[
    ClientCategory {
        title: "Office Spaces",
        description: "Premium office leasing and workspace solutions for enterprises and growing businesses.",
        image: "https://images.unsplash.com/photo-1497366811353-6870744d04b2?w=800",
    },
    ClientCategory {
        title: "Commercial Lots",
        description: "Strategic commercial land and retail locations for development and investment.",
        image: "https://images.unsplash.com/photo-1486406146926-c627a92ad1ab?w=800",
    },
    ClientCategory {
        title: "Residential Units",
        description: "Quality residential properties and housing options for families and investors.",
        image: "https://images.unsplash.com/photo-1564013799919-ab600027ffc6?w=800",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Client {
    pub name: &'static str,
    pub logo: Option<&'static str>,
}

pub const MAJOR_CLIENTS: &[Client] = &[
    Client { name: "Pryce Corporation", logo: Some("pryce.png") },
    Client { name: "EastWest Bank", logo: Some("EastWest_Bank_2011.svg.png") },
    Client {
        name: "Department of Transportation",
        logo: Some("Department_of_Transportation_(Philippines).svg.png"),
    },
    Client { name: "MinDA", logo: Some("Minda.png") },
    Client { name: "7-Eleven", logo: Some("7-Eleven-Logo.png") },
    Client { name: "KFC", logo: Some("KFC_logo-image.svg.png") },
    Client { name: "Converge ICT", logo: Some("converge.png") },
    Client { name: "Allianz", logo: Some("allianza.png") },
    Client { name: "PNB", logo: Some("PNB-logo-scaled.png") },
    Client { name: "DITO Telecommunity", logo: Some("Dito-logo.svg.png") },
    Client { name: "UPC Renewables", logo: Some("UPC.png") },
    Client { name: "Oriental Consultants Global", logo: Some("OC-Grobal.png") },
    Client { name: "Rasay Group of Companies", logo: None },
    Client { name: "ULRIC Solar", logo: Some("Ulric-Solar-min.png") },
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MetricValue {
    Single(f64),
    Range(f64, f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerfMetric {
    pub value: MetricValue,
    pub suffix: &'static str,
    pub label: &'static str,
}

pub const PERF_METRICS: &[PerfMetric] = &[
    PerfMetric {
        value: MetricValue::Single(1000.0),
        suffix: "+",
        label: "Accounts",
    },
    PerfMetric {
        value: MetricValue::Single(88.0),
        suffix: "%",
        label: "Collection Efficiency",
    },
    PerfMetric {
        value: MetricValue::Range(15.0, 20.0),
        suffix: "%",
        label: "Annual Sales Growth",
    },
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PortfolioSlice {
    pub pct: f64,
    pub label: &'static str,
}

pub const PORTFOLIO_RATIO: &[PortfolioSlice] = &[
    PortfolioSlice { pct: 75.0, label: "Secured Loans (REM)" },
    PortfolioSlice { pct: 15.0, label: "SSS / GSIS / Pension" },
    PortfolioSlice { pct: 10.0, label: "Travel Assistance" },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavGroup {
    pub title: &'static str,
    pub links: &'static [(&'static str, &'static str)],
}

pub const FOOTER_NAV: &[NavGroup] = &[
    NavGroup {
        title: "Company",
        links: &[
            ("Home", "#top"),
            ("Our Story", "#journey"),
            ("Vision & Mission", "#vision-mission"),
            ("Project 101", "#project-101"),
            ("Performance Metrics", "#performance-metrics"),
        ],
    },
    NavGroup {
        title: "Operations",
        links: &[
            ("Real Estate", "#business-models"),
            ("Retail & Distribution", "#business-models"),
            ("Lending Services", "#services"),
            ("Assets & Facilities", "#asset-management"),
        ],
    },
    NavGroup {
        title: "Contact",
        links: &[("Partnership Requests", "#contact")],
    },
];

/// Every local asset key the page can ask for.
pub fn referenced_assets() -> impl Iterator<Item = &'static str> {
    [
        LOGO,
        ABOUT_IMAGE,
        RETAIL_HERO_IMAGE,
        ASSET_MANAGEMENT_IMAGE,
        CTA_IMAGE,
        HERO_VIDEO,
    ]
    .into_iter()
    .chain(REAL_ESTATE_COMPANIES.iter().map(|c| c.image))
    .chain(RETAIL_BRANDS.iter().map(|b| b.image))
    .chain(MAJOR_CLIENTS.iter().filter_map(|c| c.logo))
}
