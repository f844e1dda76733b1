//! The built-in skill vocabulary.
//!
//! `SKILLS` is kept as the flat, grouped list it is curated in, repeats
//! included. `Vocabulary` is the runtime form: built once at startup, with
//! identical strings collapsed and one compiled pattern per term.

use std::collections::HashSet;

use crate::skills::matcher::TermPattern;

/// Recognised skill names, grouped loosely by ecosystem.
/// Some names appear under more than one group; `Vocabulary` drops the repeats.
pub const SKILLS: &[&str] = &[
    // Python
    "Python", "Jupyter", "Pandas", "NumPy", "SciPy", "Flask", "Django", "Pytest", "PyTorch",
    // Java
    "Java", "Spring", "Spring Boot", "Hibernate", "JavaFX", "JSP",
    // C++
    "C++", "STL", "Boost", "CMake", "Qt",
    // JavaScript
    "JavaScript", "ES6", "Node.js", "TypeScript", "jQuery", "Express.js",
    // SQL
    "SQL", "PostgreSQL", "MariaDB", "SQLite", "T-SQL", "NoSQL", "MongoDB", "Cassandra",
    // Machine learning
    "Machine Learning", "Scikit-learn", "XGBoost", "LightGBM", "Keras", "OpenCV",
    "Deep Learning", "Neural Networks", "CNNs", "RNNs", "GANs", "Reinforcement Learning",
    "NLP", "SpaCy", "NLTK", "Hugging Face Transformers", "NER", "Sentiment Analysis",
    "Data Analysis", "Matplotlib", "Seaborn", "Tableau", "Power BI",
    "TensorFlow", "TensorFlow Lite", "TensorFlow.js", "Keras", "TensorFlow Extended",
    "PyTorch", "TorchVision", "TorchText", "TorchAudio", "PyTorch Lightning",
    // Python web
    "Django", "Django REST Framework", "Django Channels", "Celery",
    "Flask", "Flask RESTful", "Flask-SQLAlchemy", "Flask-JWT", "Flask-WTF",
    // Frontend frameworks
    "ReactJS", "React Native", "Redux", "React Router", "Next.js", "JSX",
    "Angular", "AngularJS", "Angular Material", "NgRx",
    "Node.js", "Express.js", "NestJS", "Fastify", "Socket.io",
    // Cloud
    "AWS", "EC2", "S3", "Lambda", "RDS", "AWS Amplify", "DynamoDB", "AWS CloudFormation",
    "Azure", "Azure Functions", "Azure Blob Storage", "Azure SQL Database",
    "Azure Kubernetes Service", "Azure Active Directory",
    "GCP", "Google App Engine", "Google Compute Engine", "BigQuery", "Firebase",
    "Google Kubernetes Engine",
    // Web
    "HTML", "HTML5", "Semantic HTML", "Web Components",
    "CSS", "CSS3", "Flexbox", "CSS Grid", "SASS", "LESS", "Bootstrap",
    // Databases
    "MySQL", "MariaDB", "PostgreSQL", "MongoDB", "SQLite",
    // DevOps
    "DevOps", "Docker", "Kubernetes", "Jenkins", "Terraform", "Ansible", "CI/CD",
    "Cloud Computing", "AWS", "Google Cloud", "Microsoft Azure", "IBM Cloud", "Oracle Cloud",
    "Containerization", "Docker", "Kubernetes", "OpenShift", "Docker Compose",
    // Data platforms
    "Big Data", "Apache Hadoop", "Apache Spark", "Apache Kafka", "Hive", "Pig",
    // Blockchain
    "Blockchain", "Ethereum", "Solidity", "Hyperledger", "Cryptocurrency Development",
    // Design
    "UI/UX Design", "Figma", "Sketch", "Adobe XD", "InVision", "Wireframing",
    // Security
    "Cybersecurity", "Ethical Hacking", "Penetration Testing", "SIEM",
    "Firewalls and Network Security", "SSL/TLS Encryption",
    // Mobile
    "Mobile App Development", "Android", "Java", "Kotlin", "iOS", "Swift", "Flutter",
    "React Native", "Xamarin",
    // Games
    "Game Development", "Unity", "Unreal Engine", "C#", "Blender", "Cocos2d",
    // Version control
    "Version Control", "Git", "GitHub", "GitLab", "Bitbucket",
    // Automation and testing
    "Automation", "Selenium", "Robot Framework", "AutoHotkey", "Cypress",
    "Test Automation", "JUnit", "TestNG", "Mocha", "Jest", "Cypress",
    // IoT
    "IoT", "Raspberry Pi", "Arduino", "MQTT", "Zigbee",
    "PHP",
];

/// Read-only, deduplicated vocabulary shared by every request.
#[derive(Debug)]
pub struct Vocabulary {
    terms: Vec<TermPattern>,
}

impl Vocabulary {
    /// Builds a vocabulary from `terms`, keeping the first occurrence of each
    /// exact string. Blank terms are skipped since they would match everywhere.
    pub fn new<I, S>(terms: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut compiled = Vec::new();
        for term in terms {
            let term = term.as_ref();
            if term.trim().is_empty() || !seen.insert(term.to_string()) {
                continue;
            }
            compiled.push(TermPattern::new(term)?);
        }
        Ok(Vocabulary { terms: compiled })
    }

    /// The vocabulary compiled into the binary.
    pub fn builtin() -> Result<Self, regex::Error> {
        Self::new(SKILLS.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t.term() == term)
    }

    pub(crate) fn patterns(&self) -> impl Iterator<Item = &TermPattern> {
        self.terms.iter()
    }
}
