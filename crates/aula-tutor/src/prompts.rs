//! Prompt templates and fixed user-facing messages.
//!
//! Every string the web client shows is Spanish; keep it that way.

use aula_core::utils::take_chars;

/// Characters of the user's prompt echoed back in a simulated reply.
pub const SIMULATED_ECHO_CHARS: usize = 200;

pub const EMPTY_PROMPT: &str = "El prompt está vacío";
pub const EMPTY_QUESTION: &str = "La pregunta está vacía";

/// Note attached to the single source of an LLM-generated lookup answer.
pub const LLM_SOURCE_NOTE: &str =
    "Respuesta generada por IA con el contexto del curso; verifica la información importante.";

/// Answer of the keyword matcher when nothing matched.
pub const NOT_FOUND_ANSWER: &str = "No encontré información específica sobre esa pregunta en nuestra base de conocimiento del curso. ¿Podrías reformular tu pregunta o preguntar sobre: inteligencia artificial, ChatGPT, prompts, seguridad o el curso?";

/// Answer when nothing matched and no provider is configured.
pub const FALLBACK_ANSWER: &str = "No encontré información específica sobre esa pregunta en nuestra base de conocimiento del curso. ¿Podrías reformular tu pregunta o preguntar sobre: inteligencia artificial, ChatGPT, prompts, seguridad o el curso?\n\n💡 Consejo: Para obtener respuestas más precisas sobre temas fuera del curso, configura GEMINI_API_KEY en el archivo .env";

/// Wrap a free-practice chat prompt. Any topic is allowed here.
pub fn chat_prompt(prompt: &str) -> String {
    format!(
        "Eres un asistente amigable y útil. Puedes ayudar con cualquier tema que el usuario necesite.

IMPORTANTE:
- Da respuestas BREVES y CLARAS (máximo 3-4 párrafos)
- Usa lenguaje SIMPLE y accesible
- Si explicas conceptos técnicos, usa ejemplos cotidianos
- Sé paciente y alentador

Pregunta del usuario:
{prompt}"
    )
}

/// Wrap a course question for the instructor persona.
pub fn instructor_prompt(question: &str) -> String {
    format!(
        "Eres un instructor paciente de un curso sobre inteligencia artificial y ChatGPT para adultos mayores (+60 años) que están empezando.

Los temas del curso son: fundamentos de la IA, cómo usar asistentes como ChatGPT, técnicas para escribir buenos prompts, privacidad y seguridad digital, y los beneficios de aprender IA.

IMPORTANTE:
- Responde de forma BREVE (máximo 2-3 párrafos)
- Usa lenguaje SIMPLE y CLARO, sin tecnicismos
- Si usas términos técnicos, explícalos con ejemplos cotidianos
- Enfócate en aplicaciones prácticas para adultos mayores
- Sé alentador
- Si la pregunta no tiene relación con el curso, responde con amabilidad y sugiere volver a los temas del curso

Pregunta:
{question}"
    )
}

/// Deterministic reply used in simulation mode.
pub fn simulated_reply(prompt: &str) -> String {
    let echo = take_chars(prompt, SIMULATED_ECHO_CHARS);
    format!(
        "¡Hola! Soy el simulador de ChatGPT. Has preguntado: '{echo}'\n\n\
         Este es un espacio de práctica donde puedes hacer cualquier pregunta o solicitud. \
         Puedes pedirme que te ayude a escribir textos, explicarte conceptos, darte ideas, \
         o cualquier otra cosa que se te ocurra.\n\n\
         💡 Consejo: Formula preguntas claras y específicas. Puedes hacer preguntas de seguimiento \
         para profundizar en cualquier tema.\n\n\
         📝 Nota: Estás en modo simulación. Para usar respuestas reales de IA, \
         configura GEMINI_API_KEY en el archivo .env"
    )
}

/// Apology returned by the lookup service when the provider call fails.
pub fn llm_error_answer(error: &str) -> String {
    format!(
        "No encontré información específica en nuestra base de conocimiento y ocurrió un error al consultar con la IA: {error}. Por favor, intenta reformular tu pregunta o pregunta sobre: inteligencia artificial, ChatGPT, prompts, seguridad o el curso."
    )
}
