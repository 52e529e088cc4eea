use serde::{Deserialize, Serialize};

/// A role and the skill keywords that count towards it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub name: String,
    pub keywords: Vec<String>,
}

impl RoleEntry {
    pub fn new<S: Into<String>>(name: S, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Ordered role -> keywords mapping used both to collect skills and to score roles.
///
/// Declaration order matters: it decides skill ordering in records and breaks
/// ties between equally scored roles. Keywords are stored trimmed and
/// lowercased, without duplicates inside a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<RoleEntry>", into = "Vec<RoleEntry>")]
pub struct RoleVocabulary {
    roles: Vec<RoleEntry>,
}

impl RoleVocabulary {
    pub fn new(roles: Vec<RoleEntry>) -> Self {
        let roles = roles
            .into_iter()
            .map(|role| {
                let mut keywords: Vec<String> = Vec::with_capacity(role.keywords.len());
                for keyword in role.keywords {
                    let keyword = keyword.trim().to_lowercase();
                    if !keyword.is_empty() && !keywords.contains(&keyword) {
                        keywords.push(keyword);
                    }
                }
                RoleEntry {
                    name: role.name.trim().to_string(),
                    keywords,
                }
            })
            .collect();

        Self { roles }
    }

    pub fn roles(&self) -> &[RoleEntry] {
        &self.roles
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Every keyword of every role, in declaration order. Shared keywords repeat.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.roles
            .iter()
            .flat_map(|role| role.keywords.iter().map(String::as_str))
    }
}

impl From<Vec<RoleEntry>> for RoleVocabulary {
    fn from(roles: Vec<RoleEntry>) -> Self {
        Self::new(roles)
    }
}

impl From<RoleVocabulary> for Vec<RoleEntry> {
    fn from(vocabulary: RoleVocabulary) -> Self {
        vocabulary.roles
    }
}

impl Default for RoleVocabulary {
    fn default() -> Self {
        Self::new(vec![
            RoleEntry::new(
                "Full Stack Developer",
                &[
                    "react",
                    "node",
                    "mongodb",
                    "express.js",
                    "javascript",
                    "typescript",
                    "rest api",
                    "graphql",
                ],
            ),
            RoleEntry::new(
                "Frontend Developer",
                &[
                    "react",
                    "html",
                    "css",
                    "javascript",
                    "typescript",
                    "vue",
                    "angular",
                    "tailwind",
                    "redux",
                ],
            ),
            RoleEntry::new(
                "Backend Developer",
                &[
                    "core java",
                    "j2ee",
                    "hibernate",
                    "spring",
                    "django",
                    "flask",
                    "postgresql",
                    "mysql",
                    "microservices",
                    "node",
                ],
            ),
            RoleEntry::new(
                "Data Scientist",
                &[
                    "python",
                    "pandas",
                    "numpy",
                    "machine learning",
                    "scikit-learn",
                    "statistics",
                    "tensorflow",
                    "pytorch",
                ],
            ),
            RoleEntry::new(
                "Data Engineer",
                &[
                    "spark",
                    "hadoop",
                    "airflow",
                    "kafka",
                    "snowflake",
                    "data pipeline",
                    "sql",
                ],
            ),
            RoleEntry::new(
                "DevOps Engineer",
                &[
                    "docker",
                    "kubernetes",
                    "jenkins",
                    "terraform",
                    "ansible",
                    "ci/cd",
                    "linux",
                ],
            ),
            RoleEntry::new(
                "Cloud Engineer",
                &[
                    "amazon web services",
                    "aws lambda",
                    "azure",
                    "gcp",
                    "cloudformation",
                    "serverless",
                    "ec2",
                ],
            ),
            RoleEntry::new(
                "Mobile Developer",
                &[
                    "android",
                    "kotlin",
                    "swift",
                    "flutter",
                    "react native",
                    "xcode",
                ],
            ),
            RoleEntry::new(
                "QA Engineer",
                &[
                    "selenium",
                    "cypress",
                    "test automation",
                    "manual testing",
                    "junit",
                    "pytest",
                ],
            ),
            RoleEntry::new(
                "UI/UX Designer",
                &[
                    "figma",
                    "adobe xd",
                    "wireframing",
                    "prototyping",
                    "user research",
                ],
            ),
            RoleEntry::new(
                "Cybersecurity Analyst",
                &[
                    "penetration testing",
                    "siem",
                    "firewall",
                    "wireshark",
                    "owasp",
                    "vulnerability assessment",
                ],
            ),
        ])
    }
}
