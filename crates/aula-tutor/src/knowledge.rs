//! Course knowledge base — the fixed list of topics the lookup service
//! searches. Content is Spanish, written for adults over 60.

use aula_core::types::{Category, KnowledgeEntry};

/// All course entries, in display priority order.
pub static KNOWLEDGE_BASE: &[KnowledgeEntry] = &[
    KnowledgeEntry {
        id: "ia_intro",
        title: "¿Qué es la Inteligencia Artificial?",
        category: Category::Fundamentos,
        content: "La Inteligencia Artificial (IA) es la capacidad de las máquinas para realizar tareas que normalmente requieren inteligencia humana. Incluye aprender de experiencias, reconocer patrones, entender lenguaje natural y tomar decisiones. Ejemplos cotidianos: asistentes virtuales como Siri o Alexa, recomendaciones en Netflix, filtros de spam, reconocimiento facial en teléfonos.",
    },
    KnowledgeEntry {
        id: "chatgpt_intro",
        title: "¿Qué es ChatGPT?",
        category: Category::Fundamentos,
        content: "ChatGPT es un asistente de IA desarrollado por OpenAI que puede mantener conversaciones en lenguaje natural. Puede responder preguntas, ayudar a escribir textos, explicar conceptos complicados de forma simple, generar ideas creativas, traducir textos y ayudarte a aprender paso a paso. Funciona procesando el texto que escribes y generando respuestas coherentes basadas en patrones aprendidos.",
    },
    KnowledgeEntry {
        id: "chatgpt_usos",
        title: "Usos prácticos de ChatGPT",
        category: Category::Fundamentos,
        content: "ChatGPT puede ayudarte con: Escritura (redactar emails, corregir ortografía, escribir cartas), Aprendizaje (explicar temas, dar ejemplos, responder preguntas paso a paso), Tareas prácticas (crear listas, dar recetas adaptadas, sugerir soluciones), y Creatividad (generar ideas para regalos, escribir poemas, sugerir planes de viaje).",
    },
    KnowledgeEntry {
        id: "prompt_que_es",
        title: "¿Qué es un prompt?",
        category: Category::Prompting,
        content: "Un 'prompt' es la pregunta o instrucción que le das a ChatGPT. Es como cuando le pides algo a una persona: entre más claro seas, mejor te entenderá. Es la forma de comunicarte con la IA para obtener las respuestas que necesitas.",
    },
    KnowledgeEntry {
        id: "prompt_consejos",
        title: "Consejos para hacer buenos prompts",
        category: Category::Prompting,
        content: "Para obtener mejores respuestas: 1) Sé específico ('dame una receta fácil de pasta para 2 personas' en vez de 'háblame de comida'), 2) Da contexto ('Soy principiante en jardinería, ¿qué plantas son fáciles de cuidar?'), 3) Pide el formato que necesitas ('explícamelo de forma sencilla', 'dame una lista con pasos'), 4) Haz preguntas de seguimiento si no entiendes algo.",
    },
    KnowledgeEntry {
        id: "prompt_ejemplos",
        title: "Ejemplos de buenos prompts",
        category: Category::Prompting,
        content: "Ejemplos efectivos: 'Explícame qué es WhatsApp como si tuviera 65 años y nunca lo usé', 'Dame 5 consejos para mantener mi computadora segura', 'Ayúdame a escribir un email para cancelar una suscripción', 'Resume este texto en 3 puntos principales', 'Necesito ideas de regalos para mi nieto de 10 años que le gusta la ciencia'.",
    },
    KnowledgeEntry {
        id: "seguridad_basica",
        title: "Seguridad básica con IA",
        category: Category::Seguridad,
        content: "Consejos de seguridad al usar ChatGPT: 1) No compartas información personal sensible (contraseñas, números de tarjetas, documentos), 2) No confíes ciegamente en toda la información - ChatGPT puede equivocarse, 3) Verifica información importante con otras fuentes, 4) Ten cuidado con consejos médicos o legales - consulta profesionales para temas serios.",
    },
    KnowledgeEntry {
        id: "seguridad_privacidad",
        title: "Privacidad y datos personales",
        category: Category::Seguridad,
        content: "Protege tu privacidad: Nunca compartas en ChatGPT tu dirección completa, número de documento, contraseñas, datos bancarios, información médica personal o fotos privadas. Las conversaciones pueden ser revisadas para mejorar el servicio. Trata a ChatGPT como si fuera una conversación en un lugar público.",
    },
    KnowledgeEntry {
        id: "seguridad_estafas",
        title: "Cuidado con estafas relacionadas con IA",
        category: Category::Seguridad,
        content: "Ten cuidado con: 1) Sitios falsos que dicen ser ChatGPT oficial y piden datos personales o pagos, 2) Emails o mensajes que dicen venir de OpenAI pidiendo información, 3) Ofertas 'demasiado buenas' generadas por IA, 4) Siempre usa el sitio oficial (chat.openai.com) o aplicaciones verificadas.",
    },
    KnowledgeEntry {
        id: "limitaciones",
        title: "Limitaciones de ChatGPT",
        category: Category::Fundamentos,
        content: "ChatGPT tiene limitaciones importantes: 1) Su conocimiento tiene fecha de corte y no está actualizado en tiempo real, 2) Puede cometer errores o dar información incorrecta con confianza, 3) No puede acceder a internet, ver imágenes o abrir links, 4) No tiene memoria entre sesiones diferentes, 5) No es un experto médico, legal o financiero - consulta profesionales para temas importantes.",
    },
    KnowledgeEntry {
        id: "curso_edad",
        title: "ChatGPT para adultos mayores",
        category: Category::Curso,
        content: "Este curso está diseñado especialmente para personas mayores de 60 años que quieren aprender a usar ChatGPT. No necesitas conocimientos técnicos previos. Aprenderás a tu ritmo con ejemplos prácticos y útiles para tu vida diaria. El simulador te permite practicar sin presión y sin miedo a equivocarte.",
    },
    KnowledgeEntry {
        id: "curso_beneficios",
        title: "Beneficios de aprender IA a tu edad",
        category: Category::Curso,
        content: "Aprender a usar ChatGPT te ayudará a: 1) Mantenerte actualizado con la tecnología, 2) Comunicarte mejor por escrito, 3) Encontrar información rápidamente, 4) Ayudar a tus nietos con tareas escolares, 5) Aprender nuevas habilidades a tu ritmo, 6) Mantener tu mente activa y ejercitar la creatividad.",
    },
    KnowledgeEntry {
        id: "primeros_pasos",
        title: "Primeros pasos con ChatGPT",
        category: Category::Curso,
        content: "Para empezar: 1) Practica con este simulador sin presión, 2) Empieza con preguntas simples (¿Qué es...? ¿Cómo puedo...?), 3) Lee las respuestas con calma, 4) Haz preguntas de seguimiento si algo no queda claro, 5) No te preocupes por cometer errores - es parte del aprendizaje, 6) Experimenta y diviértete aprendiendo.",
    },
];
