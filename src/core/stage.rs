//! Stage descriptors and instruction templates
//!
//! The five stages are defined statically: the graph is known at build
//! time and never mutated. Each descriptor declares the stage's role, the
//! set of prior stages whose output feeds its instruction, and whether it
//! receives the reference document.

use crate::core::Target;
use std::fmt;

/// Directive appended to the terminal stage's instruction. The output
/// contract is enforced through this text alone; the orchestrator does not
/// re-validate the backend's compliance.
pub const CLEAN_OUTPUT_DIRECTIVE: &str = "Return ONLY the final email content. Do not include \
     any explanations, analysis, section headers, or code fences (```). The output must be the \
     clean, ready-to-send email and nothing else.";

/// Identifier of one pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum StageId {
    Research,
    Analysis,
    Extraction,
    Composition,
    Audit,
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageId::Research => "Research",
            StageId::Analysis => "Analysis",
            StageId::Extraction => "Extraction",
            StageId::Composition => "Composition",
            StageId::Audit => "Audit",
        };
        f.write_str(name)
    }
}

/// Static descriptor of a single stage.
#[derive(Debug, Clone, Copy)]
pub struct StageSpec {
    /// Stage identifier
    pub id: StageId,

    /// Role description handed to the backend
    pub role: &'static str,

    /// Prior stages whose output is substituted into this instruction
    pub depends_on: &'static [StageId],

    /// Whether the backend receives the reference document for this stage
    pub needs_reference: bool,
}

/// The fixed stage graph, in declaration order. Today this is a strict
/// linear chain with full fan-in; the orchestrator still walks it as a
/// dependency-declared list so a branching graph only needs new entries.
pub const STAGES: [StageSpec; 5] = [
    StageSpec {
        id: StageId::Research,
        role: "Company Research Specialist",
        depends_on: &[],
        needs_reference: false,
    },
    StageSpec {
        id: StageId::Analysis,
        role: "Company Analysis Expert",
        depends_on: &[StageId::Research],
        needs_reference: false,
    },
    StageSpec {
        id: StageId::Extraction,
        role: "Resume Information Extractor and Matcher",
        depends_on: &[StageId::Research, StageId::Analysis],
        needs_reference: true,
    },
    StageSpec {
        id: StageId::Composition,
        role: "Professional Email Editor",
        depends_on: &[StageId::Research, StageId::Analysis, StageId::Extraction],
        needs_reference: false,
    },
    StageSpec {
        id: StageId::Audit,
        role: "Email Quality Auditor",
        depends_on: &[
            StageId::Research,
            StageId::Analysis,
            StageId::Extraction,
            StageId::Composition,
        ],
        needs_reference: false,
    },
];

/// Applicant-side inputs shared by every run: the position being applied
/// for and the contact block the auditor appends beneath the email body.
#[derive(Debug, Clone)]
pub struct Profile {
    pub position: String,
    pub contact_block: String,
}

impl StageSpec {
    /// Build this stage's instruction text.
    ///
    /// `dep_block` is the rendered output of every declared dependency,
    /// verbatim and in order; the orchestrator assembles it so a stage can
    /// only ever see results it declared.
    pub fn instruction(&self, target: &Target, profile: &Profile, dep_block: &str) -> String {
        let mut text = match self.id {
            StageId::Research => research_instruction(target, profile),
            StageId::Analysis => analysis_instruction(target, profile),
            StageId::Extraction => extraction_instruction(target, profile),
            StageId::Composition => composition_instruction(target, profile),
            StageId::Audit => audit_instruction(target, profile),
        };

        if !dep_block.is_empty() {
            text.push_str("\n\nFindings from the earlier stages of this pipeline:\n\n");
            text.push_str(dep_block);
        }

        text
    }
}

fn research_instruction(target: &Target, profile: &Profile) -> String {
    format!(
        "Research comprehensive information about {company}.\n\
         Find details about:\n\
         - Company overview and mission\n\
         - Recent news and developments\n\
         - Initiatives and projects relevant to a {position}\n\
         - Company culture and values\n\
         - Internship programs and hiring practices\n\
         - Key technologies they use\n\
         - Recent achievements or milestones\n\
         - Preferred skills for {position} roles\n\
         - Company size and work environment\n\n\
         Provide a detailed report with all relevant information that can be \
         used to customize the application.",
        company = target.company,
        position = profile.position,
    )
}

fn analysis_instruction(target: &Target, profile: &Profile) -> String {
    format!(
        "Analyze the research findings about {company} and create a strategic \
         framework for an application email. Focus on:\n\
         - Key points that would appeal to this specific company\n\
         - How skills for a {position} should be positioned for their needs\n\
         - Company-specific customization points\n\
         - Appropriate tone and approach\n\
         - What type of projects and experience they would value most\n\
         - Technical skills they prioritize\n\n\
         Create a strategic email framework that highlights what matters most \
         to this company.",
        company = target.company,
        position = profile.position,
    )
}

fn extraction_instruction(target: &Target, profile: &Profile) -> String {
    format!(
        "Extract and analyze the candidate's resume, provided as the reference \
         document. Based on the analysis for {company}, identify and organize:\n\n\
         TECHNICAL SKILLS: programming languages, frameworks, data tools, cloud \
         platforms, databases.\n\
         RELEVANT EXPERIENCE: projects (personal, academic, or professional), \
         software development, research, internships and work experience.\n\
         EDUCATION: degree and field of study, relevant coursework, academic \
         projects.\n\
         ACHIEVEMENTS: certifications, publications, competition wins, notable \
         accomplishments.\n\n\
         Prioritize and match these elements with {company}'s specific \
         requirements and interests for a {position}.",
        company = target.company,
        position = profile.position,
    )
}

fn composition_instruction(target: &Target, profile: &Profile) -> String {
    format!(
        "Using the company research, strategic framework, and resume analysis, \
         write a professional, compelling email applying for a {position} at \
         {company}, addressed to {name}.\n\n\
         STRUCTURE: compelling subject line, professional greeting, strong \
         opening that mentions specific company interest, two to three body \
         paragraphs highlighting relevant qualifications, clear call to \
         action, professional closing.\n\n\
         CONTENT REQUIREMENTS: gender-neutral and professional throughout; \
         incorporate specific company insights and show research; highlight \
         the most relevant technical skills naturally; include one or two \
         specific projects or experiences; show genuine interest and cultural \
         fit; keep it concise but comprehensive (300-400 words).\n\n\
         PERSONALIZATION: reference specific company projects or initiatives, \
         align the candidate's experience with company needs, use appropriate \
         technical terminology.\n\n\
         Recipient: {name}\n\
         Email: {email}\n\
         Company: {company}",
        position = profile.position,
        company = target.company,
        name = target.recipient_name,
        email = target.recipient_email,
    )
}

fn audit_instruction(target: &Target, profile: &Profile) -> String {
    format!(
        "Perform a final review of the application email for {name} at \
         {company}.\n\n\
         CHECK FOR: a strong subject line (create one if missing); grammar, \
         spelling and punctuation; professional tone and appropriate \
         formality; clarity and coherence; appropriate length; gender-neutral \
         language throughout; correct spelling of the company and recipient \
         names; proper email structure and formatting.\n\n\
         VERIFY ALIGNMENT: resume information accurately represented, company \
         research properly incorporated, technical skills appropriately \
         highlighted.\n\n\
         Append exactly the following contact details beneath the email body, \
         formatted professionally, and use no other personal details:\n\
         {contact}\n\n\
         IMPORTANT: {directive}",
        name = target.recipient_name,
        company = target.company,
        contact = profile.contact_block,
        directive = CLEAN_OUTPUT_DIRECTIVE,
    )
}
