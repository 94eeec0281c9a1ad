//! Built-in labelled corpus used when no dataset file can be found.

pub const SAMPLE_RESUMES: &[(&str, &[&str])] = &[
    (
        "ACCOUNTANT",
        &[
            "CPA certified accountant with 8 years in financial reporting, tax preparation and auditing. Expertise in GAAP compliance, general ledger management and financial analysis. Proficient in QuickBooks, advanced Excel and financial modeling.",
            "Senior financial analyst specializing in budgeting, forecasting and investment analysis. Strong background in financial modeling, variance analysis and strategic planning. MBA in finance, CFA level II candidate.",
            "Tax accountant with extensive experience in corporate and individual tax planning. Expertise in IRS compliance, tax return preparation and tax advisory services. Proficient in tax software and regulatory research.",
        ],
    ),
    (
        "ADVOCATE",
        &[
            "Corporate lawyer with 10 years in contract law, mergers and acquisitions and corporate governance. Strong background in legal compliance, intellectual property and business law. Licensed to practice in multiple states.",
            "Litigation attorney specializing in civil litigation and dispute resolution. Extensive courtroom experience with a successful track record in complex cases. Strong legal research and legal writing skills.",
            "Legal counsel with expertise in regulatory compliance and corporate law. Experience in contract negotiation, risk management and legal advisory services. JD from a top law school.",
        ],
    ),
    (
        "AGRICULTURE",
        &[
            "Agricultural engineer with expertise in farm machinery, irrigation systems and sustainable farming practices. Strong background in crop production technology and soil science. MS in agricultural engineering.",
            "Farm manager with 15 years experience in crop management, livestock operations and agricultural business management. Proven track record improving farm efficiency and yield optimization.",
            "Agronomist specializing in crop science, soil management and pest control. Research experience in plant nutrition and sustainable agriculture practices. PhD in agronomy.",
        ],
    ),
    (
        "INFORMATION-TECHNOLOGY",
        &[
            "Full stack developer with 6 years experience in JavaScript, React, Node.js and Python. Strong background in cloud technologies (AWS), microservices architecture and DevOps practices. Certifications in cloud and web technologies.",
            "Data scientist specializing in machine learning, predictive modeling and big data analytics. Proficient in Python, TensorFlow, SQL and data visualization. MS in computer science with a focus on AI.",
            "DevOps engineer with expertise in AWS, Docker, Kubernetes and CI/CD pipelines. Strong background in infrastructure automation, monitoring and cloud security. Linux administration and scripting skills.",
            "Frontend developer with 5 years in React, Vue.js, TypeScript and modern CSS. Experience in responsive design, performance optimization and user experience design. Strong portfolio of web applications.",
            "Backend engineer specializing in Python, Django, REST APIs and database design. Experience in system architecture, scalability optimization and cloud infrastructure. Strong problem solving skills.",
        ],
    ),
    (
        "HEALTHCARE",
        &[
            "Registered nurse with BSN and 8 years experience in critical care and patient management. Specialized in emergency medicine and patient advocacy. ACLS and BLS certified.",
            "Medical doctor with residency in internal medicine. Board certified with expertise in diagnosis, treatment planning and patient care. Strong clinical and interpersonal skills.",
            "Healthcare administrator with MBA and experience in hospital operations, patient services and regulatory compliance. Proven track record improving healthcare delivery systems.",
        ],
    ),
    (
        "HR",
        &[
            "HR manager with 10 years in talent acquisition, employee relations and HR policy development. Strong background in performance management, compensation and organizational development. SHRM certified.",
            "Technical recruiter specializing in IT and engineering roles. Expertise in candidate sourcing, interviewing and employer branding. Strong network in the tech industry.",
            "HR business partner with experience in strategic HR planning, employee engagement and change management. Strong analytical and interpersonal skills.",
        ],
    ),
    (
        "MARKETING",
        &[
            "Digital marketing manager with 7 years in SEO, SEM, social media strategy and content marketing. Proven track record driving online growth and brand awareness. Google Analytics certified.",
            "Content marketing specialist with expertise in content strategy, copywriting and brand storytelling. Strong portfolio of successful marketing campaigns and content initiatives.",
            "Social media manager with experience in community management, influencer marketing and social media analytics. Proven ability to grow engagement and brand presence.",
        ],
    ),
    (
        "ENGINEERING",
        &[
            "Mechanical engineer with PE license and 8 years in product design and manufacturing. Expertise in CAD, SolidWorks and engineering analysis. Strong project management skills.",
            "Civil engineer specializing in structural design and construction management. Experience in AutoCAD, project planning and regulatory compliance. MS in civil engineering.",
            "Electrical engineer with background in circuit design, power systems and embedded systems. Strong analytical and problem solving skills. Experience in R&D and product development.",
        ],
    ),
];
