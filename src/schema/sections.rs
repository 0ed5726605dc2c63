use super::{FieldSpec, ItemSchema, SectionSchema};
use crate::core::Section;

pub const PROJECT_STATUSES: &[&str] = &["In Progress", "Completed", "On Hold", "Planning"];

const SKILL_CATEGORY_ROW: &[FieldSpec] = &[
    FieldSpec::text("title", "Category title").required(),
    FieldSpec::text_list("skills", "Skills"),
];

const EXPERIENCE_ROW: &[FieldSpec] = &[
    FieldSpec::text("company", "Company Name"),
    FieldSpec::text("position", "Your Position"),
    FieldSpec::text("duration", "Time Period"),
    FieldSpec::text("location", "Location"),
    FieldSpec::long_text("description", "Job Description"),
    FieldSpec::text_list("achievements", "Key Achievements"),
];

const EDUCATION_ROW: &[FieldSpec] = &[
    FieldSpec::text("institution", "Institution"),
    FieldSpec::text("degree", "Degree"),
    FieldSpec::text("field", "Field of Study"),
    FieldSpec::text("year", "Year"),
    FieldSpec::text("grade", "Grade"),
    FieldSpec::long_text("description", "Description"),
];

const PROJECT_ROW: &[FieldSpec] = &[
    FieldSpec::text("title", "Project Name"),
    FieldSpec::long_text("description", "Description"),
    FieldSpec::text_list("technologies", "Technologies"),
    FieldSpec::text("liveUrl", "Live Demo URL"),
    FieldSpec::text("githubUrl", "Code URL"),
    FieldSpec::text("image", "Image URL"),
    FieldSpec::flag("featured", "Featured", true),
];

const PERSONAL_PROJECT_ROW: &[FieldSpec] = &[
    FieldSpec::text("title", "Project Name"),
    FieldSpec::long_text("description", "Description"),
    FieldSpec::text_list("technologies", "Technologies"),
    FieldSpec::choice("status", "Status", PROJECT_STATUSES, "In Progress"),
    FieldSpec::text("liveUrl", "Live Demo URL"),
    FieldSpec::text("githubUrl", "Code URL"),
];

static HERO: SectionSchema = SectionSchema {
    section: Section::Hero,
    title: "Hero Section",
    fields: &[
        FieldSpec::text("title", "Title"),
        FieldSpec::text("subtitle", "Subtitle"),
        FieldSpec::long_text("description", "Description"),
    ],
};

static ABOUT: SectionSchema = SectionSchema {
    section: Section::About,
    title: "About Section",
    fields: &[
        FieldSpec::text("title", "Title"),
        FieldSpec::long_text("content", "Content"),
    ],
};

static CONTACT: SectionSchema = SectionSchema {
    section: Section::Contact,
    title: "Contact Information",
    fields: &[
        FieldSpec::email("email", "Email").placeholder("your.email@example.com"),
        FieldSpec::text("linkedin", "LinkedIn URL").placeholder("https://linkedin.com/in/yourprofile"),
        FieldSpec::text("github", "GitHub URL").placeholder("https://github.com/yourusername"),
    ],
};

static SKILLS: SectionSchema = SectionSchema {
    section: Section::Skills,
    title: "Skills & Technologies",
    fields: &[FieldSpec::struct_list(
        "categories",
        "Categories",
        ItemSchema {
            fields: SKILL_CATEGORY_ROW,
            identity: &["title"],
            require_nonempty: &["skills"],
        },
    )],
};

static EXPERIENCE: SectionSchema = SectionSchema {
    section: Section::Experience,
    title: "Professional Experience",
    fields: &[
        FieldSpec::text_or("title", "Section Title", "Professional Experience"),
        FieldSpec::struct_list(
            "experiences",
            "Jobs",
            ItemSchema {
                fields: EXPERIENCE_ROW,
                identity: &["company", "position"],
                require_nonempty: &[],
            },
        ),
    ],
};

static EDUCATION: SectionSchema = SectionSchema {
    section: Section::Education,
    title: "Education",
    fields: &[
        FieldSpec::text_or("title", "Section Title", "Education"),
        FieldSpec::struct_list(
            "education",
            "Degrees",
            ItemSchema {
                fields: EDUCATION_ROW,
                identity: &["institution", "degree"],
                require_nonempty: &[],
            },
        ),
    ],
};

static PROJECTS: SectionSchema = SectionSchema {
    section: Section::Projects,
    title: "Featured Projects",
    fields: &[
        FieldSpec::text_or("title", "Section Title", "Featured Projects"),
        FieldSpec::struct_list(
            "projects",
            "Projects",
            ItemSchema {
                fields: PROJECT_ROW,
                identity: &["title"],
                require_nonempty: &[],
            },
        ),
    ],
};

static PERSONAL_PROJECTS: SectionSchema = SectionSchema {
    section: Section::PersonalProjects,
    title: "Personal Projects",
    fields: &[
        FieldSpec::text_or("title", "Section Title", "Personal Projects"),
        FieldSpec::struct_list(
            "projects",
            "Projects",
            ItemSchema {
                fields: PERSONAL_PROJECT_ROW,
                identity: &["title"],
                require_nonempty: &[],
            },
        ),
    ],
};

pub fn schema_for(section: Section) -> &'static SectionSchema {
    match section {
        Section::Hero => &HERO,
        Section::About => &ABOUT,
        Section::Contact => &CONTACT,
        Section::Skills => &SKILLS,
        Section::Experience => &EXPERIENCE,
        Section::Education => &EDUCATION,
        Section::Projects => &PROJECTS,
        Section::PersonalProjects => &PERSONAL_PROJECTS,
    }
}
