#![allow(dead_code)]

use folio_core::model::{CvData, Localized, Project, ProjectCategory};

pub const PROFILE_YAML: &str = r#"
profile:
  name: Andressa Silva
  role:
    pt: Desenvolvedora Full Stack
    en: Full Stack Developer
  summary:
    pt: Desenvolvedora apaixonada por dados, interfaces e sistemas distribuídos.
    en: Developer passionate about data, interfaces and distributed systems.
  contact:
    email: andressa@example.com
    phone: "+55 11 99999-0000"
    location: São Paulo, Brasil
  social:
    linkedin: https://linkedin.com/in/andressa-silva
    github: https://github.com/AndressaSilva0
skills:
  technical: [TypeScript, React, Python, "SQL, NoSQL"]
  areas: [Web, Dados]
  languages:
    - name: Português
      level: { pt: Nativo, en: Native }
      percent: 100
    - name: English
      level: { pt: Avançado, en: Advanced }
      percent: 80
projects:
  - id: 1
    title: { pt: Painel de Vendas, en: Sales Dashboard }
    description:
      pt: Painel interativo com "filtros", gráficos e exportação.
      en: Interactive dashboard with "filters", charts and export.
    tech: Next.js, Tailwind
    category: web
    link: https://github.com/AndressaSilva0/sales
  - id: 2
    title: { pt: Classificador de Imagens }
    description: { pt: Rede neural para classificar imagens de satélite. }
    tech: Python
    category: ai
    link: https://github.com/AndressaSilva0/classifier
    image: /projects/classifier.png
"#;

pub fn sample_cv() -> CvData {
    serde_yaml::from_str(PROFILE_YAML).expect("fixture profile parses")
}

pub fn filler_project(id: u32, words: usize) -> Project {
    let description = vec!["lorem ipsum dolor sit amet"; words].join(" ");
    Project {
        id,
        title: Localized::new(format!("Projeto {id}"), Some(format!("Project {id}").as_str())),
        description: Localized::native(description),
        tech: "Rust".to_string(),
        category: ProjectCategory::Cs,
        link: format!("https://example.com/{id}"),
        image: None,
    }
}
