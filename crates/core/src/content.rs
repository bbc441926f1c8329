//! Fixed copy shown on the home, about and contact pages and in the footer.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Testimonial {
    pub quote: &'static str,
    pub name: &'static str,
    pub role: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mushroom {
    pub name: &'static str,
    pub description: &'static str,
    pub image: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub path: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactDetails {
    pub address: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub opening_hours: [&'static str; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub label: &'static str,
    pub url: &'static str,
}

pub const TAGLINE: &str = "Fuel your day with nature's most powerful beverages";

pub const NAV_LINKS: [NavLink; 5] = [
    NavLink { path: "/", label: "Home" },
    NavLink { path: "/menu", label: "Menu" },
    NavLink { path: "/about", label: "About" },
    NavLink { path: "/contact", label: "Contact" },
    NavLink { path: "/order", label: "Order" },
];

pub const TESTIMONIALS: [Testimonial; 6] = [
    Testimonial {
        quote: "The best coffee I've ever had! The Brainstorm Brew is my favorite. It's not just delicious but also gives me the energy I need to start my day.",
        name: "Jane Doe",
        role: "Coffee Lover",
    },
    Testimonial {
        quote: "I'm obsessed with the Zen Matcha Latte. It's so smooth and calming. Perfect for my afternoon pick-me-up!",
        name: "John Smith",
        role: "Matcha Enthusiast",
    },
    Testimonial {
        quote: "The Immunity Mocha is a game-changer. It's rich, flavorful, and I feel healthier every time I drink it.",
        name: "Emily Johnson",
        role: "Health Advocate",
    },
    Testimonial {
        quote: "I've tried many mushroom coffees, but mycoBrew's Focus Blend has the perfect balance. It keeps me alert without the jitters.",
        name: "Michael Brown",
        role: "Productivity Coach",
    },
    Testimonial {
        quote: "Their Relaxation Elixir is now part of my evening routine. The taste is divine and it helps me unwind after a long day.",
        name: "Sarah Williams",
        role: "Yoga Instructor",
    },
    Testimonial {
        quote: "As a barista, I'm picky about my coffee. The Clarity Cappuccino exceeded my expectations with its depth of flavor and smooth finish.",
        name: "David Chen",
        role: "Professional Barista",
    },
];

pub const MUSHROOMS: [Mushroom; 4] = [
    Mushroom {
        name: "Lion's Mane",
        description: "Known for its cognitive benefits, Lion's Mane supports brain health, memory, and focus. It's a natural nootropic that helps enhance mental clarity.",
        image: "/images/lions-mane.jpg",
    },
    Mushroom {
        name: "Cordyceps",
        description: "Cordyceps is renowned for boosting energy and stamina. It helps improve physical performance and supports respiratory health.",
        image: "/images/cordyceps.jpg",
    },
    Mushroom {
        name: "Chaga",
        description: "Chaga is a powerful antioxidant that supports immune health and promotes overall well-being. It's often used for its anti-inflammatory properties.",
        image: "/images/chaga.jpg",
    },
    Mushroom {
        name: "Reishi",
        description: "Reishi is known as the 'mushroom of immortality.' It supports stress relief, relaxation, and a healthy immune system.",
        image: "/images/reishi.jpg",
    },
];

pub const CONTACT: ContactDetails = ContactDetails {
    address: "123 Mushroom Lane, London, UK",
    phone: "+44 123 456 7890",
    email: "info@mycobrew.com",
    opening_hours: ["Mon-Fri: 8:00 AM - 6:00 PM", "Sat-Sun: 9:00 AM - 5:00 PM"],
};

pub const SOCIAL_LINKS: [SocialLink; 4] = [
    SocialLink { label: "Facebook", url: "https://facebook.com" },
    SocialLink { label: "Twitter", url: "https://twitter.com" },
    SocialLink { label: "Instagram", url: "https://instagram.com" },
    SocialLink { label: "LinkedIn", url: "https://linkedin.com" },
];
