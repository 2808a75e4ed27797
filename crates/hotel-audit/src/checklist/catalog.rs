use std::collections::HashSet;

use serde::Serialize;

use super::domain::{ChecklistCategory, ChecklistError, ChecklistItem, EvidenceKind};

/// The full set of weighted categories evaluated during a property audit.
///
/// A catalog is immutable once constructed; audit sessions and score reports
/// borrow it through an `Arc` for the lifetime of the process.
#[derive(Debug, Clone, Serialize)]
pub struct ChecklistCatalog {
    categories: Vec<ChecklistCategory>,
}

impl ChecklistCatalog {
    /// Returns the standard five-category hotel audit checklist.
    pub fn standard() -> Self {
        Self {
            categories: standard_categories(),
        }
    }

    /// Builds a catalog from caller-supplied categories, rejecting definitions
    /// that would break scoring or evidence gating later on.
    pub fn new(categories: Vec<ChecklistCategory>) -> Result<Self, ChecklistError> {
        let mut category_ids = HashSet::new();
        let mut item_ids = HashSet::new();
        for category in &categories {
            if !category_ids.insert(category.id) {
                return Err(ChecklistError::DuplicateIdentifier(category.id.to_owned()));
            }
            for item in &category.items {
                if !item_ids.insert(item.id) {
                    return Err(ChecklistError::DuplicateIdentifier(item.id.to_owned()));
                }
                if item.category != category.id {
                    return Err(ChecklistError::CategoryMismatch(item.id.to_owned()));
                }
                if item.max_score == 0 {
                    return Err(ChecklistError::InvalidMaxScore(item.id.to_owned()));
                }
                for kind in &item.required_evidence {
                    if !item.permitted_evidence.contains(kind) {
                        return Err(ChecklistError::UnpermittedRequiredEvidence {
                            item_id: item.id.to_owned(),
                            kind: *kind,
                        });
                    }
                }
            }
        }
        Ok(Self { categories })
    }

    /// Categories in display order.
    pub fn categories(&self) -> &[ChecklistCategory] {
        &self.categories
    }

    pub fn category(&self, category_id: &str) -> Result<&ChecklistCategory, ChecklistError> {
        self.categories
            .iter()
            .find(|category| category.id == category_id)
            .ok_or_else(|| ChecklistError::CategoryNotFound(category_id.to_owned()))
    }

    pub fn item(&self, item_id: &str) -> Result<&ChecklistItem, ChecklistError> {
        self.find_item(item_id)
            .ok_or_else(|| ChecklistError::ItemNotFound(item_id.to_owned()))
    }

    pub fn find_item(&self, item_id: &str) -> Option<&ChecklistItem> {
        self.items().find(|item| item.id == item_id)
    }

    pub fn items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.categories
            .iter()
            .flat_map(|category| category.items.iter())
    }

    pub fn item_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.items.len())
            .sum()
    }
}

fn standard_categories() -> Vec<ChecklistCategory> {
    use EvidenceKind::{Photo, Text, Video};

    vec![
        ChecklistCategory {
            id: "arrival-checkin",
            name: "Arrival & Check-In Experience",
            description: "First impression and check-in process evaluation",
            weight: 0.25,
            items: vec![
                ChecklistItem {
                    id: "valet-greeting",
                    category: "arrival-checkin",
                    subcategory: Some("exterior-service"),
                    title: "Valet and Bellboy Greeting",
                    description: "Immediate acknowledgment and warm greeting upon arrival",
                    max_score: 10,
                    weight: 0.8,
                    permitted_evidence: vec![Photo, Video, Text],
                    required_evidence: vec![Text],
                    scoring_criteria: "Assess greeting warmth, promptness (within 30 seconds), professionalism, and adherence to Taj hospitality standards",
                },
                ChecklistItem {
                    id: "luggage-assistance",
                    category: "arrival-checkin",
                    subcategory: Some("exterior-service"),
                    title: "Luggage Assistance Offered",
                    description: "Proactive offer and handling of guest luggage",
                    max_score: 10,
                    weight: 0.7,
                    permitted_evidence: vec![Photo, Video, Text],
                    required_evidence: vec![Text],
                    scoring_criteria: "Evaluate proactive offering, careful handling, efficient transportation to room",
                },
                ChecklistItem {
                    id: "lobby-greeting",
                    category: "arrival-checkin",
                    subcategory: Some("reception"),
                    title: "Staff Greeting (Namaste/Welcome Drink)",
                    description: "Traditional Taj greeting and welcome amenity presentation",
                    max_score: 15,
                    weight: 0.9,
                    permitted_evidence: vec![Photo, Video, Text],
                    required_evidence: vec![Photo, Text],
                    scoring_criteria: "Assess cultural greeting authenticity, welcome drink quality/presentation, staff warmth and Tajness embodiment",
                },
                ChecklistItem {
                    id: "guest-name-usage",
                    category: "arrival-checkin",
                    subcategory: Some("personalization"),
                    title: "Use of Guest Name (Minimum 2x)",
                    description: "Personalized service through frequent, appropriate name usage",
                    max_score: 10,
                    weight: 0.8,
                    permitted_evidence: vec![Text, Video],
                    required_evidence: vec![Text],
                    scoring_criteria: "Count name usage frequency, assess naturalness and appropriateness of usage",
                },
                ChecklistItem {
                    id: "checkin-efficiency",
                    category: "arrival-checkin",
                    subcategory: Some("process"),
                    title: "Efficient Check-in Process (Under 5 Minutes)",
                    description: "Streamlined check-in without delays or complications",
                    max_score: 15,
                    weight: 0.9,
                    permitted_evidence: vec![Text, Video],
                    required_evidence: vec![Text],
                    scoring_criteria: "Measure time duration, assess process smoothness, staff preparedness, system efficiency",
                },
                ChecklistItem {
                    id: "room-key-presentation",
                    category: "arrival-checkin",
                    subcategory: Some("process"),
                    title: "Room Key and Information Presentation",
                    description: "Professional handover of room keys with property information",
                    max_score: 10,
                    weight: 0.6,
                    permitted_evidence: vec![Photo, Text],
                    required_evidence: vec![Text],
                    scoring_criteria: "Evaluate presentation style, information completeness, directions clarity",
                },
            ],
        },
        ChecklistCategory {
            id: "room-experience",
            name: "Room Experience & Amenities",
            description: "In-room service quality and amenity standards",
            weight: 0.3,
            items: vec![
                ChecklistItem {
                    id: "room-cleanliness",
                    category: "room-experience",
                    subcategory: Some("housekeeping"),
                    title: "Room Cleanliness and Readiness",
                    description: "Overall cleanliness, organization, and preparation standards",
                    max_score: 20,
                    weight: 1.0,
                    permitted_evidence: vec![Photo, Video, Text],
                    required_evidence: vec![Photo, Text],
                    scoring_criteria: "Assess cleanliness of all surfaces, bathroom condition, bed preparation, dust-free environment, overall presentation",
                },
                ChecklistItem {
                    id: "amenity-availability",
                    category: "room-experience",
                    subcategory: Some("amenities"),
                    title: "Amenity Availability and Quality",
                    description: "Complete amenity setup including toiletries, linens, and room supplies",
                    max_score: 15,
                    weight: 0.8,
                    permitted_evidence: vec![Photo, Text],
                    required_evidence: vec![Photo, Text],
                    scoring_criteria: "Check amenity completeness, quality, presentation, brand consistency, expiration dates",
                },
                ChecklistItem {
                    id: "welcome-personalization",
                    category: "room-experience",
                    subcategory: Some("personalization"),
                    title: "Personalized Welcome Note or Gift",
                    description: "Customized welcome gesture reflecting guest preferences",
                    max_score: 10,
                    weight: 0.7,
                    permitted_evidence: vec![Photo, Text],
                    required_evidence: vec![Photo],
                    scoring_criteria: "Evaluate personalization level, presentation quality, relevance to guest profile",
                },
                ChecklistItem {
                    id: "appliance-functionality",
                    category: "room-experience",
                    subcategory: Some("technical"),
                    title: "Functional Appliances and Climate Control",
                    description: "All room appliances working properly including AC, TV, lighting",
                    max_score: 15,
                    weight: 0.9,
                    permitted_evidence: vec![Photo, Video, Text],
                    required_evidence: vec![Text],
                    scoring_criteria: "Test all appliances, assess climate control responsiveness, lighting functionality, technology integration",
                },
                ChecklistItem {
                    id: "room-maintenance",
                    category: "room-experience",
                    subcategory: Some("maintenance"),
                    title: "Room Maintenance and Aesthetics",
                    description: "Physical condition of room including fixtures, furniture, decor",
                    max_score: 15,
                    weight: 0.8,
                    permitted_evidence: vec![Photo, Video, Text],
                    required_evidence: vec![Photo, Text],
                    scoring_criteria: "Assess furniture condition, wall/ceiling condition, fixture functionality, aesthetic appeal",
                },
                ChecklistItem {
                    id: "bathroom-standards",
                    category: "room-experience",
                    subcategory: Some("bathroom"),
                    title: "Bathroom Standards and Amenities",
                    description: "Bathroom cleanliness, amenities, and functionality",
                    max_score: 20,
                    weight: 0.9,
                    permitted_evidence: vec![Photo, Video, Text],
                    required_evidence: vec![Photo, Text],
                    scoring_criteria: "Evaluate cleanliness, water pressure, amenity quality, towel condition, overall maintenance",
                },
            ],
        },
        ChecklistCategory {
            id: "dining-experience",
            name: "Dining Experience",
            description: "Restaurant service quality and food standards",
            weight: 0.25,
            items: vec![
                ChecklistItem {
                    id: "host-greeting-seating",
                    category: "dining-experience",
                    subcategory: Some("reception"),
                    title: "Host Greeting and Seating",
                    description: "Restaurant host welcome and table assignment process",
                    max_score: 10,
                    weight: 0.7,
                    permitted_evidence: vec![Photo, Video, Text],
                    required_evidence: vec![Text],
                    scoring_criteria: "Assess greeting warmth, waiting time, seating appropriateness, host professionalism",
                },
                ChecklistItem {
                    id: "menu-explanation",
                    category: "dining-experience",
                    subcategory: Some("service"),
                    title: "Menu Explanation and Specials",
                    description: "Server knowledge and presentation of menu items and daily specials",
                    max_score: 15,
                    weight: 0.8,
                    permitted_evidence: vec![Photo, Video, Text],
                    required_evidence: vec![Text],
                    scoring_criteria: "Evaluate menu knowledge, special dish presentation, dietary accommodation, recommendation quality",
                },
                ChecklistItem {
                    id: "service-timeliness",
                    category: "dining-experience",
                    subcategory: Some("efficiency"),
                    title: "Timeliness of Service",
                    description: "Speed and efficiency of order taking, food delivery, and service",
                    max_score: 15,
                    weight: 0.9,
                    permitted_evidence: vec![Text, Video],
                    required_evidence: vec![Text],
                    scoring_criteria: "Measure ordering time, food delivery time, service intervals, overall efficiency",
                },
                ChecklistItem {
                    id: "food-quality",
                    category: "dining-experience",
                    subcategory: Some("culinary"),
                    title: "Taste, Temperature, and Presentation",
                    description: "Food quality assessment including taste, proper temperature, and visual presentation",
                    max_score: 20,
                    weight: 1.0,
                    permitted_evidence: vec![Photo, Video, Text],
                    required_evidence: vec![Photo, Text],
                    scoring_criteria: "Assess food temperature appropriateness, visual presentation, portion size, taste quality based on description",
                },
                ChecklistItem {
                    id: "dining-ambiance",
                    category: "dining-experience",
                    subcategory: Some("atmosphere"),
                    title: "Dining Ambiance and Environment",
                    description: "Restaurant atmosphere, cleanliness, and overall dining environment",
                    max_score: 10,
                    weight: 0.6,
                    permitted_evidence: vec![Photo, Video, Text],
                    required_evidence: vec![Photo],
                    scoring_criteria: "Evaluate cleanliness, lighting, music level, table setup, overall atmosphere",
                },
            ],
        },
        ChecklistCategory {
            id: "staff-interaction",
            name: "Staff Interaction & Service",
            description: "Staff professionalism and adherence to Taj standards",
            weight: 0.2,
            items: vec![
                ChecklistItem {
                    id: "grooming-uniform",
                    category: "staff-interaction",
                    subcategory: Some("appearance"),
                    title: "Grooming and Uniform Standards",
                    description: "Staff appearance, uniform condition, and personal grooming",
                    max_score: 15,
                    weight: 0.8,
                    permitted_evidence: vec![Photo, Text],
                    required_evidence: vec![Photo, Text],
                    scoring_criteria: "Assess uniform cleanliness and fit, grooming standards, name tag visibility, overall professional appearance",
                },
                ChecklistItem {
                    id: "hospitality-markers",
                    category: "staff-interaction",
                    subcategory: Some("behavior"),
                    title: "Hospitality Markers (Smile, Empathy)",
                    description: "Demonstration of genuine hospitality through body language and demeanor",
                    max_score: 15,
                    weight: 0.9,
                    permitted_evidence: vec![Photo, Video, Text],
                    required_evidence: vec![Text],
                    scoring_criteria: "Evaluate smile frequency, eye contact, empathetic responses, positive body language",
                },
                ChecklistItem {
                    id: "tajness-adherence",
                    category: "staff-interaction",
                    subcategory: Some("brand-standards"),
                    title: "Adherence to \"Tajness\" - Mindfulness, Grace, Warmth",
                    description: "Embodiment of Taj brand values through service delivery",
                    max_score: 20,
                    weight: 1.0,
                    permitted_evidence: vec![Video, Text],
                    required_evidence: vec![Text],
                    scoring_criteria: "Assess mindful service approach, graceful interactions, warmth demonstration, cultural sensitivity, brand value embodiment",
                },
                ChecklistItem {
                    id: "problem-resolution",
                    category: "staff-interaction",
                    subcategory: Some("service-recovery"),
                    title: "Problem Resolution and Service Recovery",
                    description: "Staff ability to handle issues and recover service failures",
                    max_score: 15,
                    weight: 0.8,
                    permitted_evidence: vec![Text, Video],
                    required_evidence: vec![Text],
                    scoring_criteria: "Evaluate problem-solving approach, recovery speed, guest satisfaction, proactive solutions",
                },
                ChecklistItem {
                    id: "local-knowledge",
                    category: "staff-interaction",
                    subcategory: Some("expertise"),
                    title: "Local Knowledge and Recommendations",
                    description: "Staff knowledge of local attractions, culture, and recommendations",
                    max_score: 10,
                    weight: 0.6,
                    permitted_evidence: vec![Text],
                    required_evidence: vec![Text],
                    scoring_criteria: "Assess local knowledge depth, recommendation quality, cultural insights, personalized suggestions",
                },
            ],
        },
        ChecklistCategory {
            id: "checkout-experience",
            name: "Check-Out Experience",
            description: "Final impression and departure process evaluation",
            weight: 0.1,
            items: vec![
                ChecklistItem {
                    id: "billing-accuracy",
                    category: "checkout-experience",
                    subcategory: Some("billing"),
                    title: "Timely and Accurate Billing",
                    description: "Efficient checkout process with accurate billing and no delays",
                    max_score: 15,
                    weight: 0.9,
                    permitted_evidence: vec![Photo, Text],
                    required_evidence: vec![Text],
                    scoring_criteria: "Assess billing accuracy, checkout time (under 3 minutes), clarity of charges, resolution of any discrepancies",
                },
                ChecklistItem {
                    id: "farewell-gesture",
                    category: "checkout-experience",
                    subcategory: Some("hospitality"),
                    title: "Farewell Gesture and Appreciation",
                    description: "Warm farewell with gratitude expression and safe travel wishes",
                    max_score: 10,
                    weight: 0.8,
                    permitted_evidence: vec![Video, Text],
                    required_evidence: vec![Text],
                    scoring_criteria: "Evaluate warmth of farewell, gratitude expression, personal touch, cultural appropriateness of farewell",
                },
                ChecklistItem {
                    id: "loyalty-membership-offer",
                    category: "checkout-experience",
                    subcategory: Some("relationship-building"),
                    title: "Loyalty Membership or Future Booking Offer",
                    description: "Proactive offering of loyalty program benefits and future stay opportunities",
                    max_score: 10,
                    weight: 0.7,
                    permitted_evidence: vec![Text, Photo],
                    required_evidence: vec![Text],
                    scoring_criteria: "Assess proactive offering, benefit explanation clarity, enthusiasm in presentation, follow-up commitment",
                },
                ChecklistItem {
                    id: "luggage-departure-assistance",
                    category: "checkout-experience",
                    subcategory: Some("service"),
                    title: "Luggage and Transportation Assistance",
                    description: "Assistance with luggage and transportation arrangements upon departure",
                    max_score: 10,
                    weight: 0.6,
                    permitted_evidence: vec![Photo, Video, Text],
                    required_evidence: vec![Text],
                    scoring_criteria: "Evaluate luggage handling care, transportation arrangement efficiency, staff proactiveness",
                },
                ChecklistItem {
                    id: "feedback-collection",
                    category: "checkout-experience",
                    subcategory: Some("improvement"),
                    title: "Guest Feedback Collection",
                    description: "Solicitation of guest feedback and suggestions for future improvements",
                    max_score: 5,
                    weight: 0.5,
                    permitted_evidence: vec![Text],
                    required_evidence: vec![Text],
                    scoring_criteria: "Assess feedback solicitation approach, listening quality, note-taking, promise of follow-up action",
                },
            ],
        },
    ]
}
