//! Prompt composition for the widget-analysis model call.

use super::aggregator::SystemSnapshot;
use serde_json::Value;

/// At most this many records of each collection are serialized into the
/// context block; the headers still report the full collection sizes.
const MAX_RECORDS_PER_COLLECTION: usize = 50;

/// Fixed instruction describing the mandatory widget JSON format.
pub const SYSTEM_PROMPT: &str = r#"Você é um Assistente de Análise de Dados especializado em gerar visualizações inteligentes.

SEU PAPEL:
- Analisar dados de vendas, leads, produtos e clientes
- Gerar widgets de visualização (cards, gráficos, tabelas) baseados nos dados
- Retornar SEMPRE um JSON estruturado no formato especificado

FORMATO DE RESPOSTA OBRIGATÓRIO:
Você DEVE retornar um JSON válido com a seguinte estrutura:

{
  "widgets": [
    {
      "tipo": "card",
      "titulo": "Total de Vendas",
      "dados": {
        "valor": 150000,
        "variacao": "+15%",
        "subtitulo": "vs mês anterior"
      }
    },
    {
      "tipo": "grafico_barras",
      "titulo": "Top 5 Produtos",
      "dados": {
        "labels": ["Produto A", "Produto B", "Produto C"],
        "values": [100, 80, 60]
      }
    },
    {
      "tipo": "tabela",
      "titulo": "Leads em Negociação",
      "dados": {
        "colunas": ["Nome", "Valor", "Estágio"],
        "linhas": [
          ["Lead 1", "R$ 10.000", "Proposta"],
          ["Lead 2", "R$ 15.000", "Negociação"]
        ]
      }
    }
  ]
}

TIPOS DE WIDGETS DISPONÍVEIS:
- card: Para métricas principais (valor, variação, subtítulo)
- grafico_barras: Para comparações (labels, values)
- grafico_linha: Para tendências temporais (labels, values)
- grafico_pizza: Para distribuições (labels, values)
- tabela: Para dados detalhados (colunas, linhas)

REGRAS IMPORTANTES:
1. SEMPRE retorne JSON válido, nunca texto livre
2. Escolha os widgets mais adequados para responder a pergunta
3. Use dados reais fornecidos no contexto
4. Seja visual e informativo
5. Priorize insights acionáveis"#;

/// Build the context block: each collection truncated to its first 50
/// records (original order, full count in the header), then the user's
/// question and the JSON-only instruction.
pub fn compose_context(snapshot: &SystemSnapshot, question: &str) -> String {
    format!(
        "DADOS DO SISTEMA:\n\n\
         LEADS ({} total):\n{}\n\n\
         PARCEIROS/CLIENTES ({} total):\n{}\n\n\
         PRODUTOS ({} total):\n{}\n\n\
         PEDIDOS ({} total):\n{}\n\n\
         PERGUNTA DO USUÁRIO:\n{}\n\n\
         IMPORTANTE: Retorne APENAS o JSON estruturado com os widgets. \
         Não adicione texto explicativo antes ou depois do JSON.",
        snapshot.leads.len(),
        serialize_head(&snapshot.leads),
        snapshot.parceiros.len(),
        serialize_head(&snapshot.parceiros),
        snapshot.produtos.len(),
        serialize_head(&snapshot.produtos),
        snapshot.pedidos.len(),
        serialize_head(&snapshot.pedidos),
        question,
    )
}

fn serialize_head(records: &[Value]) -> String {
    let head = &records[..records.len().min(MAX_RECORDS_PER_COLLECTION)];
    serde_json::to_string_pretty(head).unwrap_or_else(|_| "[]".to_string())
}
